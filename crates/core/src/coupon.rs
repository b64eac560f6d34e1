//! Coupon submission lifecycle and point resolution.
//!
//! A coupon is created `pending` and reviewed exactly once, moving to
//! `approved` or `rejected`. Both outcomes are terminal.

use serde::{Deserialize, Serialize};

use crate::campaign::CampaignSettings;
use crate::error::CoreError;

/// Point value used when neither the reviewer nor the campaign supplies one.
pub const DEFAULT_POINTS_PER_COUPON: i32 = 10;

// ---------------------------------------------------------------------------
// Status state machine
// ---------------------------------------------------------------------------

/// Review status of a coupon submission, stored as text in `coupons.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    Pending,
    Approved,
    Rejected,
}

impl CouponStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CouponStatus::Pending => "pending",
            CouponStatus::Approved => "approved",
            CouponStatus::Rejected => "rejected",
        }
    }

    /// Parse a stored status value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(CouponStatus::Pending),
            "approved" => Ok(CouponStatus::Approved),
            "rejected" => Ok(CouponStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: pending, approved, rejected"
            ))),
        }
    }

    /// Approved and rejected coupons never change status again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, CouponStatus::Pending)
    }
}

/// An admin's review outcome for a pending coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    /// Parse a decision from request input. `pending` is not a decision.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "approved" => Ok(ReviewDecision::Approved),
            "rejected" => Ok(ReviewDecision::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be \"approved\" or \"rejected\""
            ))),
        }
    }

    pub fn status(self) -> CouponStatus {
        match self {
            ReviewDecision::Approved => CouponStatus::Approved,
            ReviewDecision::Rejected => CouponStatus::Rejected,
        }
    }
}

/// Check that a coupon in `current` status may still be reviewed.
pub fn ensure_reviewable(current: CouponStatus) -> Result<(), CoreError> {
    if current.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "This coupon has already been reviewed (status: {})",
            current.as_str()
        )));
    }
    Ok(())
}

/// Resolve the points a review awards.
///
/// Rejections always award zero. Approvals use the reviewer's explicit value
/// when present, then the campaign's `points_per_coupon`, then
/// [`DEFAULT_POINTS_PER_COUPON`].
pub fn resolve_points(
    decision: ReviewDecision,
    awarded_points: Option<i32>,
    settings: &CampaignSettings,
) -> Result<i32, CoreError> {
    match decision {
        ReviewDecision::Rejected => Ok(0),
        ReviewDecision::Approved => match awarded_points {
            Some(points) if points < 0 => Err(CoreError::Validation(
                "points_awarded must not be negative".to_string(),
            )),
            Some(points) => Ok(points),
            None => Ok(settings.points_per_coupon()),
        },
    }
}

// ---------------------------------------------------------------------------
// Extracted receipt payload
// ---------------------------------------------------------------------------

/// One receipt line item as returned by the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub matched_keyword: Option<String>,
}

/// Structured receipt data produced by the extraction service.
///
/// Stored verbatim in `coupons.extracted_data`; the settlement rules never
/// read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub customer_name: Option<String>,
    pub date: Option<String>,
    pub store: Option<String>,
    pub total: Option<f64>,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub has_matching_products: bool,
}

impl ExtractedData {
    /// Deduplicate `matched_keywords`, keeping first occurrences in order.
    pub fn dedup_keywords(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.matched_keywords.retain(|k| seen.insert(k.clone()));
        self
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn settings_with_points(points: Option<i32>) -> CampaignSettings {
        CampaignSettings {
            points_per_coupon: points,
            ..Default::default()
        }
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            CouponStatus::Pending,
            CouponStatus::Approved,
            CouponStatus::Rejected,
        ] {
            assert_eq!(CouponStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_validation_error() {
        assert_matches!(CouponStatus::parse("flagged"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn pending_is_not_a_decision() {
        assert_matches!(ReviewDecision::parse("pending"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn only_pending_is_reviewable() {
        assert!(ensure_reviewable(CouponStatus::Pending).is_ok());
        assert_matches!(
            ensure_reviewable(CouponStatus::Approved),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            ensure_reviewable(CouponStatus::Rejected),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn approval_uses_explicit_points_first() {
        let points =
            resolve_points(ReviewDecision::Approved, Some(25), &settings_with_points(Some(7)));
        assert_eq!(points.unwrap(), 25);
    }

    #[test]
    fn approval_falls_back_to_campaign_setting() {
        let points = resolve_points(ReviewDecision::Approved, None, &settings_with_points(Some(7)));
        assert_eq!(points.unwrap(), 7);
    }

    #[test]
    fn approval_falls_back_to_default() {
        let points = resolve_points(ReviewDecision::Approved, None, &settings_with_points(None));
        assert_eq!(points.unwrap(), DEFAULT_POINTS_PER_COUPON);
    }

    #[test]
    fn rejection_forces_zero_points() {
        let points =
            resolve_points(ReviewDecision::Rejected, Some(50), &settings_with_points(Some(7)));
        assert_eq!(points.unwrap(), 0);
    }

    #[test]
    fn negative_points_are_rejected() {
        assert_matches!(
            resolve_points(ReviewDecision::Approved, Some(-1), &settings_with_points(None)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn extracted_data_defaults_missing_lists() {
        let data: ExtractedData =
            serde_json::from_value(serde_json::json!({ "store": "Loja Centro" })).unwrap();
        assert!(data.items.is_empty());
        assert!(data.matched_keywords.is_empty());
        assert!(!data.has_matching_products);
    }

    #[test]
    fn dedup_keywords_keeps_first_occurrence() {
        let data = ExtractedData {
            customer_name: None,
            date: None,
            store: None,
            total: None,
            items: vec![],
            matched_keywords: vec!["soda".into(), "chips".into(), "soda".into()],
            has_matching_products: true,
        }
        .dedup_keywords();
        assert_eq!(data.matched_keywords, vec!["soda", "chips"]);
    }
}
