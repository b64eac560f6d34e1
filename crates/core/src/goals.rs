//! Periodic goal configuration, period boundaries and progress math.
//!
//! Periods are computed on UTC calendar dates. A period is the closed date
//! range `[start, end]`; timestamps match it when they fall anywhere from
//! `start 00:00:00` up to the last instant of `end`.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Repetition window of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPeriod {
    Weekly,
    Monthly,
}

/// What a goal counts. Only approved coupons are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMetric {
    #[default]
    ApprovedCoupons,
}

/// One entry of `campaigns.settings.goals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub id: String,
    pub label: String,
    pub period: GoalPeriod,
    #[serde(default)]
    pub metric: GoalMetric,
    pub target: i32,
    #[serde(default)]
    pub bonus_points: i32,
    #[serde(default)]
    pub lucky_numbers: i32,
}

// ---------------------------------------------------------------------------
// Period boundaries
// ---------------------------------------------------------------------------

/// Closed date range of one goal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodBounds {
    /// The period of kind `period` containing `now`.
    ///
    /// Weekly periods run Monday through Sunday. Monthly periods run from the
    /// first to the last calendar day of the month.
    pub fn containing(period: GoalPeriod, now: Timestamp) -> Self {
        let today = now.date_naive();
        match period {
            GoalPeriod::Weekly => {
                let back = u64::from(today.weekday().num_days_from_monday());
                let start = today - Days::new(back);
                Self {
                    start,
                    end: start + Days::new(6),
                }
            }
            GoalPeriod::Monthly => {
                let start = today - Days::new(u64::from(today.day0()));
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                };
                // The first day of the following month always exists for
                // dates chrono can represent; fall back to the current day.
                let end = next_month.map_or(today, |d| d - Days::new(1));
                Self { start, end }
            }
        }
    }

    /// Half-open timestamp range `[from, until)` covering the whole period,
    /// end day included.
    pub fn timestamp_range(&self) -> (Timestamp, Timestamp) {
        let from = self.start.and_time(NaiveTime::MIN).and_utc();
        let until = (self.end + Days::new(1)).and_time(NaiveTime::MIN).and_utc();
        (from, until)
    }

    /// Whether `at` falls inside the period.
    pub fn contains(&self, at: Timestamp) -> bool {
        let (from, until) = self.timestamp_range();
        from <= at && at < until
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress toward a goal within one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub current_count: i64,
    pub target: i32,
    pub percentage: i32,
    pub is_completed: bool,
}

/// Percentage of `target` reached, rounded half up and capped at 100.
pub fn progress_percentage(current_count: i64, target: i32) -> i32 {
    if target <= 0 {
        return 100;
    }
    let target = i64::from(target);
    let rounded = (200 * current_count + target) / (2 * target);
    rounded.clamp(0, 100) as i32
}

/// Whether the count has reached the goal's target.
pub fn target_reached(current_count: i64, target: i32) -> bool {
    current_count >= i64::from(target)
}

/// Summarise progress. A goal counts as completed when a completion is
/// already recorded for the period or the target has been reached.
pub fn summarize(goal: &GoalConfig, current_count: i64, has_completion: bool) -> ProgressSummary {
    ProgressSummary {
        current_count,
        target: goal.target,
        percentage: progress_percentage(current_count, goal.target),
        is_completed: has_completion || target_reached(current_count, goal.target),
    }
}
