//! Notification types and the messages emitted on settlement transitions.
//!
//! Builders here only decide *what* to tell the user; writing the row and
//! delivering it belong to the events crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::channels::CHANNEL_IN_APP;
use crate::coupon::ReviewDecision;
use crate::goals::GoalConfig;
use crate::types::DbId;

/// Value of `notifications.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    GoalCompleted,
    CouponApproved,
    CouponRejected,
    LuckyNumber,
    DrawWinner,
    CampaignNew,
    General,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::GoalCompleted => "goal_completed",
            NotificationType::CouponApproved => "coupon_approved",
            NotificationType::CouponRejected => "coupon_rejected",
            NotificationType::LuckyNumber => "lucky_number",
            NotificationType::DrawWinner => "draw_winner",
            NotificationType::CampaignNew => "campaign_new",
            NotificationType::General => "general",
        }
    }
}

/// A notification ready to be emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationMessage {
    pub user_id: DbId,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: Option<String>,
    pub data: serde_json::Value,
    pub channel: String,
}

impl NotificationMessage {
    pub fn new(
        user_id: DbId,
        notification_type: NotificationType,
        title: impl Into<String>,
        body: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            user_id,
            notification_type,
            title: title.into(),
            body: Some(body.into()),
            data,
            channel: CHANNEL_IN_APP.to_string(),
        }
    }

    /// Override the delivery channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }
}

/// Message for the owner of a freshly reviewed coupon.
pub fn coupon_reviewed(
    user_id: DbId,
    coupon_id: DbId,
    campaign_id: DbId,
    decision: ReviewDecision,
    points_awarded: i32,
) -> NotificationMessage {
    let data = json!({
        "coupon_id": coupon_id,
        "campaign_id": campaign_id,
        "points_awarded": points_awarded,
    });
    match decision {
        ReviewDecision::Approved => NotificationMessage::new(
            user_id,
            NotificationType::CouponApproved,
            "Coupon approved",
            format!("Your coupon was approved and earned {points_awarded} points."),
            data,
        ),
        ReviewDecision::Rejected => NotificationMessage::new(
            user_id,
            NotificationType::CouponRejected,
            "Coupon rejected",
            "Your coupon was reviewed and could not be approved.",
            data,
        ),
    }
}

/// Message for a user who just completed a goal.
pub fn goal_completed(
    user_id: DbId,
    campaign_id: DbId,
    goal: &GoalConfig,
    goal_completion_id: DbId,
    period_start: NaiveDate,
) -> NotificationMessage {
    NotificationMessage::new(
        user_id,
        NotificationType::GoalCompleted,
        format!("Goal reached: {}", goal.label),
        format!(
            "You reached {} approved coupons and earned {} bonus points.",
            goal.target, goal.bonus_points
        ),
        json!({
            "campaign_id": campaign_id,
            "goal_id": goal.id,
            "goal_completion_id": goal_completion_id,
            "period_start": period_start,
            "bonus_points": goal.bonus_points,
        }),
    )
}

/// Message listing lucky numbers granted by a goal completion.
pub fn lucky_numbers_issued(
    user_id: DbId,
    campaign_id: DbId,
    goal_completion_id: DbId,
    numbers: &[i32],
) -> NotificationMessage {
    let listed = numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    NotificationMessage::new(
        user_id,
        NotificationType::LuckyNumber,
        "New lucky numbers",
        format!("You received lucky numbers: {listed}."),
        json!({
            "campaign_id": campaign_id,
            "goal_completion_id": goal_completion_id,
            "numbers": numbers,
        }),
    )
}

/// Message for the owner of a winning ticket.
pub fn draw_winner(
    user_id: DbId,
    campaign_id: DbId,
    lucky_number_id: DbId,
    number: i32,
) -> NotificationMessage {
    NotificationMessage::new(
        user_id,
        NotificationType::DrawWinner,
        "You won the draw!",
        format!("Your lucky number {number} was drawn. Congratulations!"),
        json!({
            "campaign_id": campaign_id,
            "lucky_number_id": lucky_number_id,
            "number": number,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::CHANNEL_BOTH;
    use crate::goals::{GoalMetric, GoalPeriod};

    #[test]
    fn type_strings_match_serde_names() {
        for t in [
            NotificationType::GoalCompleted,
            NotificationType::CouponApproved,
            NotificationType::CouponRejected,
            NotificationType::LuckyNumber,
            NotificationType::DrawWinner,
            NotificationType::CampaignNew,
            NotificationType::General,
        ] {
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
        }
    }

    #[test]
    fn approval_message_references_coupon() {
        let msg = coupon_reviewed(3, 11, 2, ReviewDecision::Approved, 10);
        assert_eq!(msg.notification_type, NotificationType::CouponApproved);
        assert_eq!(msg.data["coupon_id"], 11);
        assert_eq!(msg.data["points_awarded"], 10);
        assert_eq!(msg.channel, CHANNEL_IN_APP);
    }

    #[test]
    fn rejection_message_has_rejected_type() {
        let msg = coupon_reviewed(3, 11, 2, ReviewDecision::Rejected, 0);
        assert_eq!(msg.notification_type, NotificationType::CouponRejected);
    }

    #[test]
    fn goal_message_carries_period() {
        let goal = GoalConfig {
            id: "w5".into(),
            label: "Five a week".into(),
            period: GoalPeriod::Weekly,
            metric: GoalMetric::ApprovedCoupons,
            target: 5,
            bonus_points: 20,
            lucky_numbers: 2,
        };
        let start = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        let msg = goal_completed(3, 2, &goal, 40, start);
        assert_eq!(msg.data["goal_id"], "w5");
        assert_eq!(msg.data["period_start"], "2026-10-12");
        assert!(msg.title.contains("Five a week"));
    }

    #[test]
    fn lucky_number_message_lists_numbers() {
        let msg = lucky_numbers_issued(3, 2, 40, &[7, 8]);
        assert_eq!(msg.body.as_deref(), Some("You received lucky numbers: 7, 8."));
        assert_eq!(msg.data["numbers"], serde_json::json!([7, 8]));
    }

    #[test]
    fn draw_winner_message_references_ticket() {
        let msg = draw_winner(3, 2, 99, 4).with_channel(CHANNEL_BOTH);
        assert_eq!(msg.notification_type, NotificationType::DrawWinner);
        assert_eq!(msg.data["number"], 4);
        assert_eq!(msg.channel, CHANNEL_BOTH);
    }
}
