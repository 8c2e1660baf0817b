//! Fund DTOs

use serde::Serialize;
use uuid::Uuid;

use domain_nav::Fund;

#[derive(Debug, Serialize)]
pub struct FundResponse {
    pub id: Uuid,
    pub code: String,
    pub tracked_asset: String,
    pub display_name: String,
    pub is_active: bool,
}

impl From<&Fund> for FundResponse {
    fn from(fund: &Fund) -> Self {
        Self {
            id: *fund.id.as_uuid(),
            code: fund.code.clone(),
            tracked_asset: fund.tracked_asset.clone(),
            display_name: fund.display_name(),
            is_active: fund.is_active,
        }
    }
}
