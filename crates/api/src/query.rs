//! Shared query parameter types for API handlers.

use loyalty_core::types::DbId;
use serde::Deserialize;

/// Optional `?campaign_id=` filter.
#[derive(Debug, Deserialize)]
pub struct CampaignFilterParams {
    pub campaign_id: Option<DbId>,
}
