//! Tests for decimal precision and input parsing helpers

use chrono::NaiveDate;
use core_kernel::{
    parse_date, parse_decimal, parse_optional_decimal, percent_of, round_currency, round_percent,
    round_price, round_units, CoreError,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod rounding {
    use super::*;

    #[test]
    fn test_round_price_six_places() {
        assert_eq!(round_price(dec!(1.2345674999)), dec!(1.234567));
        assert_eq!(round_price(dec!(0.9147846123)), dec!(0.914785));
    }

    #[test]
    fn test_round_units_six_places() {
        assert_eq!(round_units(dec!(123.456789012345)), dec!(123.456789));
    }

    #[test]
    fn test_round_currency_two_places() {
        assert_eq!(round_currency(dec!(10733.499)), dec!(10733.50));
    }

    #[test]
    fn test_round_percent_four_places() {
        assert_eq!(round_percent(dec!(-0.0164381)), dec!(-0.0164));
    }
}

mod percentages {
    use super::*;

    #[test]
    fn test_percent_of_simple() {
        assert_eq!(percent_of(dec!(50), dec!(1000)), Some(dec!(5)));
    }

    #[test]
    fn test_percent_of_negative_part() {
        assert_eq!(percent_of(dec!(-50), dec!(1000)), Some(dec!(-5)));
    }

    #[test]
    fn test_percent_of_zero_base_is_zero() {
        assert_eq!(percent_of(dec!(50), Decimal::ZERO), Some(Decimal::ZERO));
    }

    #[test]
    fn test_percent_of_out_of_range_is_none() {
        assert_eq!(percent_of(Decimal::MAX, dec!(0.5)), None);
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(parse_decimal("deposits", " 10733.50 ").unwrap(), dec!(10733.50));
    }

    #[test]
    fn test_parse_negative_decimal() {
        assert_eq!(parse_decimal("realized", "-12.75").unwrap(), dec!(-12.75));
    }

    #[test]
    fn test_parse_empty_required_is_malformed() {
        let err = parse_decimal("deposits", "").unwrap_err();
        assert_eq!(err, CoreError::malformed("deposits", ""));
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        let err = parse_decimal("withdrawals", "ten").unwrap_err();
        assert!(matches!(
            err,
            CoreError::MalformedInput { ref field, .. } if field == "withdrawals"
        ));
    }

    #[test]
    fn test_parse_optional_empty_is_none() {
        assert_eq!(parse_optional_decimal("servicing_fee_override", "  ").unwrap(), None);
    }

    #[test]
    fn test_parse_optional_value() {
        assert_eq!(
            parse_optional_decimal("servicing_fee_override", "1.25").unwrap(),
            Some(dec!(1.25))
        );
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(
            parse_date("date", "2025-10-21").unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 21).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("date", "21/10/2025").is_err());
        assert!(parse_date("date", "2025-02-30").is_err());
    }
}

proptest! {
    #[test]
    fn prop_percent_of_zero_base_never_fails(part in -1_000_000i64..1_000_000i64) {
        prop_assert_eq!(percent_of(Decimal::new(part, 2), Decimal::ZERO), Some(Decimal::ZERO));
    }

    #[test]
    fn prop_parse_decimal_accepts_display_output(
        mantissa in -1_000_000_000i64..1_000_000_000i64,
        scale in 0u32..8u32,
    ) {
        let value = Decimal::new(mantissa, scale);
        prop_assert_eq!(parse_decimal("amount", &value.to_string()).unwrap(), value);
    }
}
