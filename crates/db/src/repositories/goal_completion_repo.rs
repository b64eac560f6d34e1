//! Repository for the `goal_completions` table.

use loyalty_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::goal_completion::{CreateGoalCompletion, GoalCompletion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, campaign_id, goal_id, period_start, period_end, \
    coupons_count, bonus_points_awarded, completed_at";

/// Provides idempotent completion recording and lookups.
pub struct GoalCompletionRepo;

impl GoalCompletionRepo {
    /// Record a completion unless one already exists for
    /// `(user_id, campaign_id, goal_id, period_start)`.
    ///
    /// Returns the new row, or `None` when the key was already taken. This is
    /// the idempotency guard for goal rewards.
    pub async fn insert_if_absent<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateGoalCompletion,
    ) -> Result<Option<GoalCompletion>, sqlx::Error> {
        let query = format!(
            "INSERT INTO goal_completions
                (user_id, campaign_id, goal_id, period_start, period_end, coupons_count, bonus_points_awarded)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_goal_completions_user_campaign_goal_period DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GoalCompletion>(&query)
            .bind(input.user_id)
            .bind(input.campaign_id)
            .bind(&input.goal_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.coupons_count)
            .bind(input.bonus_points_awarded)
            .fetch_optional(executor)
            .await
    }

    /// List a user's completions in a campaign, most recent first.
    pub async fn list_for_user_campaign<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        campaign_id: DbId,
    ) -> Result<Vec<GoalCompletion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM goal_completions
             WHERE user_id = $1 AND campaign_id = $2
             ORDER BY period_start DESC, id DESC"
        );
        sqlx::query_as::<_, GoalCompletion>(&query)
            .bind(user_id)
            .bind(campaign_id)
            .fetch_all(executor)
            .await
    }

    /// Sum of bonus points across all of a user's completions.
    ///
    /// Reconciliation support for tests, paired with
    /// [`CouponRepo::sum_approved_points`](super::CouponRepo::sum_approved_points).
    /// No request path calls it.
    pub async fn sum_bonus_points(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let sum: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(bonus_points_awarded)::BIGINT FROM goal_completions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(sum.unwrap_or(0))
    }
}
