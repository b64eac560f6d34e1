//! Goal evaluation: period progress and idempotent completion.

use chrono::NaiveDate;
use loyalty_core::campaign::CampaignSettings;
use loyalty_core::error::CoreError;
use loyalty_core::goals::{summarize, target_reached, GoalConfig, PeriodBounds};
use loyalty_core::notification::{goal_completed, lucky_numbers_issued, NotificationMessage};
use loyalty_core::types::{DbId, Timestamp};
use loyalty_db::models::goal_completion::{CreateGoalCompletion, GoalCompletion};
use loyalty_db::models::lucky_number::LuckyNumber;
use loyalty_db::repositories::{CampaignRepo, CouponRepo, GoalCompletionRepo, ProfileRepo};
use loyalty_db::DbPool;
use serde::Serialize;
use sqlx::PgConnection;

use crate::engine::lucky_numbers;
use crate::error::AppResult;

/// Everything a goal re-check produced inside the settlement transaction.
#[derive(Debug, Default)]
pub struct GoalEvaluation {
    pub completions: Vec<GoalCompletion>,
    pub lucky_numbers: Vec<LuckyNumber>,
    /// Bonus points credited to the user.
    pub bonus_points: i64,
    /// Messages to emit once the transaction commits.
    pub notifications: Vec<NotificationMessage>,
}

/// Re-check every goal of a campaign for one user.
///
/// For each goal whose current-period count has reached its target and
/// which has no completion for `(user_id, campaign_id, goal_id, period_start)`
/// yet, record the completion, credit the bonus points and issue the goal's
/// tickets.
/// The completion insert is the idempotency guard: when it finds the key
/// taken, nothing else happens for that goal.
pub async fn evaluate(
    conn: &mut PgConnection,
    user_id: DbId,
    campaign_id: DbId,
    settings: &CampaignSettings,
    now: Timestamp,
) -> AppResult<GoalEvaluation> {
    let mut evaluation = GoalEvaluation::default();

    for goal in &settings.goals {
        let bounds = PeriodBounds::containing(goal.period, now);
        let (from, until) = bounds.timestamp_range();
        let count =
            CouponRepo::count_approved_between(&mut *conn, user_id, campaign_id, from, until)
                .await?;
        if !target_reached(count, goal.target) {
            continue;
        }

        let inserted = GoalCompletionRepo::insert_if_absent(
            &mut *conn,
            &CreateGoalCompletion {
                user_id,
                campaign_id,
                goal_id: goal.id.clone(),
                period_start: bounds.start,
                period_end: bounds.end,
                coupons_count: count,
                bonus_points_awarded: goal.bonus_points,
            },
        )
        .await?;
        let Some(completion) = inserted else {
            continue;
        };

        if goal.bonus_points > 0 {
            ProfileRepo::add_points(&mut *conn, user_id, i64::from(goal.bonus_points)).await?;
            evaluation.bonus_points += i64::from(goal.bonus_points);
        }

        tracing::info!(
            user_id,
            campaign_id,
            goal_id = %goal.id,
            period_start = %bounds.start,
            coupons_count = count,
            bonus_points = goal.bonus_points,
            "Goal completed"
        );
        evaluation.notifications.push(goal_completed(
            user_id,
            campaign_id,
            goal,
            completion.id,
            bounds.start,
        ));

        if goal.lucky_numbers > 0 {
            let tickets = lucky_numbers::issue(
                &mut *conn,
                user_id,
                campaign_id,
                goal.lucky_numbers,
                Some(completion.id),
            )
            .await?;
            let numbers: Vec<i32> = tickets.iter().map(|t| t.number).collect();
            evaluation.notifications.push(lucky_numbers_issued(
                user_id,
                campaign_id,
                completion.id,
                &numbers,
            ));
            evaluation.lucky_numbers.extend(tickets);
        }

        evaluation.completions.push(completion);
    }

    Ok(evaluation)
}

// ---------------------------------------------------------------------------
// Read path
// ---------------------------------------------------------------------------

/// Progress toward one goal in the period containing "now".
#[derive(Debug, Serialize)]
pub struct GoalProgress {
    pub goal: GoalConfig,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub current_count: i64,
    pub target: i32,
    pub percentage: i32,
    pub is_completed: bool,
    pub completion: Option<GoalCompletion>,
}

/// Compute a user's progress on every goal of a campaign.
///
/// Read-only: a reached target without a recorded completion reports
/// `is_completed` but is only recorded by the next review.
pub async fn progress(
    pool: &DbPool,
    user_id: DbId,
    campaign_id: DbId,
    now: Timestamp,
) -> AppResult<Vec<GoalProgress>> {
    let campaign = CampaignRepo::find_by_id(pool, campaign_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        })?;
    let settings = campaign.parsed_settings().map_err(CoreError::Internal)?;
    if settings.goals.is_empty() {
        return Ok(Vec::new());
    }

    let completions = GoalCompletionRepo::list_for_user_campaign(pool, user_id, campaign_id).await?;

    let mut result = Vec::with_capacity(settings.goals.len());
    for goal in settings.goals {
        let bounds = PeriodBounds::containing(goal.period, now);
        let (from, until) = bounds.timestamp_range();
        let count =
            CouponRepo::count_approved_between(pool, user_id, campaign_id, from, until).await?;
        let completion = completions
            .iter()
            .find(|c| c.goal_id == goal.id && c.period_start == bounds.start)
            .cloned();
        let summary = summarize(&goal, count, completion.is_some());

        result.push(GoalProgress {
            period_start: bounds.start,
            period_end: bounds.end,
            current_count: summary.current_count,
            target: summary.target,
            percentage: summary.percentage,
            is_completed: summary.is_completed,
            completion,
            goal,
        });
    }
    Ok(result)
}
