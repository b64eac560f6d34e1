//! Leaderboard and store performance read models.

use chrono::Duration;
use loyalty_core::error::CoreError;
use loyalty_core::goals::{GoalPeriod, PeriodBounds};
use loyalty_core::leaderboard::{rank_entries, LeaderboardEntry};
use loyalty_core::types::{DbId, Timestamp};
use loyalty_db::repositories::{CampaignRepo, LeaderboardRepo, StoreRepo};
use loyalty_db::models::leaderboard::StorePerformanceRow;
use loyalty_db::DbPool;

use crate::error::AppResult;

/// Ranked leaderboard of a campaign, optionally restricted to one store.
///
/// Only users with at least one approved coupon in the campaign appear.
pub async fn ranked(
    pool: &DbPool,
    campaign_id: DbId,
    store_id: Option<DbId>,
) -> AppResult<Vec<LeaderboardEntry>> {
    CampaignRepo::find_by_id(pool, campaign_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        })?;

    if let Some(store_id) = store_id {
        StoreRepo::find_by_id(pool, store_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Store",
                id: store_id,
            })?;
    }

    let rows = LeaderboardRepo::campaign_rows(pool, campaign_id, store_id).await?;
    Ok(rank_entries(rows.into_iter().map(LeaderboardEntry::from).collect()))
}

/// Per-store performance, with weekly counts for the week containing `now`
/// and the week before it.
pub async fn store_performance(
    pool: &DbPool,
    now: Timestamp,
) -> AppResult<Vec<StorePerformanceRow>> {
    let (week_start, week_end) = PeriodBounds::containing(GoalPeriod::Weekly, now).timestamp_range();
    let previous_week_start = week_start - Duration::days(7);
    let rows =
        LeaderboardRepo::store_performance(pool, previous_week_start, week_start, week_end).await?;
    Ok(rows)
}
