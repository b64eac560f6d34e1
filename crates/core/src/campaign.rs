//! Campaign settings, save-time validation and the submission window.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coupon::DEFAULT_POINTS_PER_COUPON;
use crate::goals::GoalConfig;

/// How a campaign's prizes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawType {
    Manual,
    Random,
}

/// The `campaigns.settings` JSON object.
///
/// Unknown keys are ignored and every recognised key is optional, so rows
/// written before a setting existed still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignSettings {
    #[serde(default)]
    pub points_per_coupon: Option<i32>,
    #[serde(default)]
    pub has_draws: bool,
    #[serde(default)]
    pub draw_type: Option<DrawType>,
    #[serde(default)]
    pub goals: Vec<GoalConfig>,
}

impl CampaignSettings {
    /// Parse the stored JSON, treating `null` as empty settings.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone()).map_err(|e| format!("Invalid campaign settings: {e}"))
    }

    /// Default points for an approval in this campaign.
    pub fn points_per_coupon(&self) -> i32 {
        self.points_per_coupon
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_POINTS_PER_COUPON)
    }
}

/// Validate settings before a campaign is saved.
///
/// The goal evaluator assumes every goal passed this check.
pub fn validate_settings(settings: &CampaignSettings) -> Result<(), String> {
    if let Some(points) = settings.points_per_coupon {
        if points <= 0 {
            return Err(format!("points_per_coupon must be positive, got {points}"));
        }
    }

    let mut ids = HashSet::new();
    for goal in &settings.goals {
        if goal.id.trim().is_empty() {
            return Err("Goal id must not be empty".to_string());
        }
        if !ids.insert(goal.id.as_str()) {
            return Err(format!("Duplicate goal id '{}'", goal.id));
        }
        if goal.target <= 0 {
            return Err(format!(
                "Goal '{}' target must be positive, got {}",
                goal.id, goal.target
            ));
        }
        if goal.bonus_points < 0 {
            return Err(format!("Goal '{}' bonus_points must not be negative", goal.id));
        }
        if goal.lucky_numbers < 0 {
            return Err(format!("Goal '{}' lucky_numbers must not be negative", goal.id));
        }
    }
    Ok(())
}

/// Validate a campaign's title and date window.
pub fn validate_campaign(title: &str, start_date: NaiveDate, end_date: NaiveDate) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Campaign title is required".to_string());
    }
    if start_date > end_date {
        return Err(format!(
            "start_date ({start_date}) must not be after end_date ({end_date})"
        ));
    }
    Ok(())
}

/// Whether a campaign accepts new coupons on `today`. Both bounds are inclusive.
pub fn accepts_submissions(
    is_active: bool,
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
) -> bool {
    is_active && start_date <= today && today <= end_date
}
