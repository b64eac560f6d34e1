//! Lucky-number ticket model.

use loyalty_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lucky_numbers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LuckyNumber {
    pub id: DbId,
    pub user_id: DbId,
    pub campaign_id: DbId,
    pub goal_completion_id: Option<DbId>,
    pub number: i32,
    pub is_winner: bool,
    pub drawn_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
