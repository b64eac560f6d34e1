//! Repository for the `lucky_numbers` table.

use loyalty_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::lucky_number::LuckyNumber;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, campaign_id, goal_completion_id, number, is_winner, drawn_at, created_at";

/// Provides ticket issuance, draw-pool reads and winner marking.
pub struct LuckyNumberRepo;

impl LuckyNumberRepo {
    /// Insert `count` tickets numbered `first..first + count` for a user.
    ///
    /// The caller reserves the range via
    /// [`CampaignRepo::reserve_lucky_numbers`](crate::repositories::CampaignRepo::reserve_lucky_numbers).
    /// Returned rows are ordered by number.
    pub async fn insert_range<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        campaign_id: DbId,
        goal_completion_id: Option<DbId>,
        first: i32,
        count: i32,
    ) -> Result<Vec<LuckyNumber>, sqlx::Error> {
        let query = format!(
            "INSERT INTO lucky_numbers (user_id, campaign_id, goal_completion_id, number)
             SELECT $1, $2, $3, n
             FROM generate_series($4::INTEGER, $4::INTEGER + $5::INTEGER - 1) AS n
             RETURNING {COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, LuckyNumber>(&query)
            .bind(user_id)
            .bind(campaign_id)
            .bind(goal_completion_id)
            .bind(first)
            .bind(count)
            .fetch_all(executor)
            .await?;
        rows.sort_by_key(|r| r.number);
        Ok(rows)
    }

    /// All never-drawn tickets of a campaign, ordered by number.
    pub async fn list_eligible<'e>(
        executor: impl PgExecutor<'e>,
        campaign_id: DbId,
    ) -> Result<Vec<LuckyNumber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lucky_numbers
             WHERE campaign_id = $1 AND is_winner = false
             ORDER BY number ASC"
        );
        sqlx::query_as::<_, LuckyNumber>(&query)
            .bind(campaign_id)
            .fetch_all(executor)
            .await
    }

    /// Flip `is_winner` and stamp `drawn_at` on the given tickets.
    ///
    /// Tickets that are already winners are left untouched and omitted from
    /// the result. Returned rows are ordered by number.
    pub async fn mark_winners<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<Vec<LuckyNumber>, sqlx::Error> {
        let query = format!(
            "UPDATE lucky_numbers SET is_winner = true, drawn_at = NOW()
             WHERE id = ANY($1) AND is_winner = false
             RETURNING {COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, LuckyNumber>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await?;
        rows.sort_by_key(|r| r.number);
        Ok(rows)
    }

    /// List tickets, optionally restricted to one owner and/or campaign,
    /// ordered by number.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        campaign_id: Option<DbId>,
    ) -> Result<Vec<LuckyNumber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lucky_numbers
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL OR campaign_id = $2)
             ORDER BY campaign_id ASC, number ASC"
        );
        sqlx::query_as::<_, LuckyNumber>(&query)
            .bind(user_id)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
