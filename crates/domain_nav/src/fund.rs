//! Fund definitions
//!
//! Each fund tracks one leveraged exchange-traded asset and keeps its own,
//! independent ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::FundId;

/// An independently tracked fund
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    /// Unique identifier
    pub id: FundId,
    /// Fund code (short identifier, e.g. `SCENQ`)
    pub code: String,
    /// Ticker of the asset the fund tracks (e.g. `TQQQ`)
    pub tracked_asset: String,
    /// Whether the fund still takes new ledger days
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Fund {
    /// Creates a new fund
    ///
    /// # Arguments
    ///
    /// * `code` - Short fund identifier
    /// * `tracked_asset` - Ticker of the underlying asset
    pub fn new(code: impl Into<String>, tracked_asset: impl Into<String>) -> Self {
        Self {
            id: FundId::new_v7(),
            code: code.into(),
            tracked_asset: tracked_asset.into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Name shown to people, e.g. `SCENQ (TQQQ)`
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.code, self.tracked_asset)
    }

    /// Marks the fund as closed
    pub fn deactivate(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The four funds maintained by the desk
    pub fn standard_catalog() -> Vec<Fund> {
        [("SCENQ", "TQQQ"), ("SCENB", "BITU"), ("SCENU", "UPRO"), ("SCENT", "TECL")]
            .into_iter()
            .map(|(code, asset)| Fund::new(code, asset))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let fund = Fund::new("SCENQ", "TQQQ");
        assert_eq!(fund.display_name(), "SCENQ (TQQQ)");
        assert!(fund.is_active);
    }

    #[test]
    fn test_standard_catalog_has_distinct_ids() {
        let catalog = Fund::standard_catalog();
        assert_eq!(catalog.len(), 4);
        assert_ne!(catalog[0].id, catalog[1].id);
        assert_eq!(catalog[1].display_name(), "SCENB (BITU)");
    }
}
