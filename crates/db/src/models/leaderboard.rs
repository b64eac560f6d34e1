//! Leaderboard and store performance projection rows.

use loyalty_core::leaderboard::LeaderboardEntry;
use loyalty_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Per-user campaign aggregates as read from the database, before ranking.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub user_id: DbId,
    pub full_name: String,
    pub store_id: Option<DbId>,
    pub store_name: Option<String>,
    pub campaign_points: i64,
    pub approved_coupons_count: i64,
    pub lucky_numbers_count: i64,
    pub first_approved_at: Option<Timestamp>,
}

impl From<LeaderboardRow> for LeaderboardEntry {
    fn from(row: LeaderboardRow) -> Self {
        LeaderboardEntry {
            user_id: row.user_id,
            full_name: row.full_name,
            store_id: row.store_id,
            store_name: row.store_name,
            campaign_points: row.campaign_points,
            approved_coupons_count: row.approved_coupons_count,
            lucky_numbers_count: row.lucky_numbers_count,
            first_approved_at: row.first_approved_at,
            rank: 0,
        }
    }
}

/// Per-store aggregates for the admin performance overview.
///
/// Totals cover every campaign. `total_points` is the sum of the store's
/// members' running totals.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorePerformanceRow {
    pub store_id: DbId,
    pub store_name: String,
    pub cnpj: String,
    pub location: Option<String>,
    pub salesperson_count: i64,
    pub total_coupons: i64,
    pub approved_coupons: i64,
    pub total_points: i64,
    pub goals_completed: i64,
    pub current_week_approved: i64,
    pub previous_week_approved: i64,
}
