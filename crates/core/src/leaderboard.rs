//! Leaderboard ranking.
//!
//! Ranking is a strict total order so the public ranking never depends on
//! storage order: points descending, then the earliest first approved
//! coupon, then user id.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// One ranked row of a campaign leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: DbId,
    pub full_name: String,
    pub store_id: Option<DbId>,
    pub store_name: Option<String>,
    pub campaign_points: i64,
    pub approved_coupons_count: i64,
    pub lucky_numbers_count: i64,
    pub first_approved_at: Option<Timestamp>,
    /// 1-based position; zero until [`rank_entries`] assigns it.
    pub rank: i64,
}

fn compare(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.campaign_points
        .cmp(&a.campaign_points)
        .then_with(|| match (a.first_approved_at, b.first_approved_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Sort entries into leaderboard order and assign 1-based ranks.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(compare);
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = position as i64 + 1;
    }
    entries
}
