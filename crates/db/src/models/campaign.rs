//! Campaign entity model and DTOs.

use chrono::NaiveDate;
use loyalty_core::campaign::CampaignSettings;
use loyalty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub banner_url: Option<String>,
    pub keywords: Vec<String>,
    pub settings: serde_json::Value,
    pub last_lucky_number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Campaign {
    /// Parse the `settings` column.
    pub fn parsed_settings(&self) -> Result<CampaignSettings, String> {
        CampaignSettings::from_json(&self.settings)
    }
}

/// DTO for creating a new campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: Option<bool>,
    pub banner_url: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub settings: CampaignSettings,
}

/// DTO for updating an existing campaign. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaign {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub banner_url: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub settings: Option<CampaignSettings>,
}
