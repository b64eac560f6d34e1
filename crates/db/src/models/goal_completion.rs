//! Goal completion model.

use chrono::NaiveDate;
use loyalty_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `goal_completions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GoalCompletion {
    pub id: DbId,
    pub user_id: DbId,
    pub campaign_id: DbId,
    pub goal_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub coupons_count: i64,
    pub bonus_points_awarded: i32,
    pub completed_at: Timestamp,
}

/// DTO for recording a completion.
#[derive(Debug, Clone)]
pub struct CreateGoalCompletion {
    pub user_id: DbId,
    pub campaign_id: DbId,
    pub goal_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub coupons_count: i64,
    pub bonus_points_awarded: i32,
}
