//! Unit tests for the Identifiers module

use core_kernel::FundId;
use std::collections::HashSet;
use uuid::Uuid;

mod fund_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = FundId::new();
        let id2 = FundId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = FundId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = FundId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = FundId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(FundId::prefix(), "FND");
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: FundId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed, FundId::from(uuid));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("FND-not-a-uuid".parse::<FundId>().is_err());
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut ids = HashSet::new();
        let id = FundId::new();
        ids.insert(id);
        ids.insert(id);
        assert_eq!(ids.len(), 1);
    }
}
