//! Read-only leaderboard and store performance aggregation over coupons,
//! completions and tickets.

use loyalty_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::leaderboard::{LeaderboardRow, StorePerformanceRow};

/// Provides the per-user campaign aggregates behind the leaderboard.
pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// Aggregate every user with at least one approved coupon in the campaign.
    ///
    /// `campaign_points` is the sum of approved coupon points plus goal bonus
    /// points earned in the campaign. When `store_id` is set only that
    /// store's users are returned.
    pub async fn campaign_rows(
        pool: &PgPool,
        campaign_id: DbId,
        store_id: Option<DbId>,
    ) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardRow>(
            "WITH approved AS (
                SELECT user_id,
                       SUM(points_awarded)::BIGINT AS coupon_points,
                       COUNT(*) AS approved_coupons_count,
                       MIN(created_at) AS first_approved_at
                FROM coupons
                WHERE campaign_id = $1 AND status = 'approved'
                GROUP BY user_id
             ),
             bonus AS (
                SELECT user_id, SUM(bonus_points_awarded)::BIGINT AS bonus_points
                FROM goal_completions
                WHERE campaign_id = $1
                GROUP BY user_id
             ),
             tickets AS (
                SELECT user_id, COUNT(*) AS lucky_numbers_count
                FROM lucky_numbers
                WHERE campaign_id = $1
                GROUP BY user_id
             )
             SELECT p.id AS user_id,
                    p.full_name,
                    p.store_id,
                    s.name AS store_name,
                    (a.coupon_points + COALESCE(b.bonus_points, 0))::BIGINT AS campaign_points,
                    a.approved_coupons_count,
                    COALESCE(t.lucky_numbers_count, 0)::BIGINT AS lucky_numbers_count,
                    a.first_approved_at
             FROM approved a
             JOIN profiles p ON p.id = a.user_id
             LEFT JOIN stores s ON s.id = p.store_id
             LEFT JOIN bonus b ON b.user_id = a.user_id
             LEFT JOIN tickets t ON t.user_id = a.user_id
             WHERE ($2::BIGINT IS NULL OR p.store_id = $2)
             ORDER BY campaign_points DESC, a.first_approved_at ASC, p.id ASC",
        )
        .bind(campaign_id)
        .bind(store_id)
        .fetch_all(pool)
        .await
    }

    /// Aggregate every store, highest `total_points` first.
    ///
    /// Approved coupons created in `[previous_week_start, week_start)` and
    /// `[week_start, week_end)` are counted as the previous and current week.
    pub async fn store_performance(
        pool: &PgPool,
        previous_week_start: Timestamp,
        week_start: Timestamp,
        week_end: Timestamp,
    ) -> Result<Vec<StorePerformanceRow>, sqlx::Error> {
        sqlx::query_as::<_, StorePerformanceRow>(
            "WITH members AS (
                SELECT store_id,
                       COUNT(*) AS salesperson_count,
                       SUM(total_points)::BIGINT AS total_points
                FROM profiles
                WHERE store_id IS NOT NULL
                GROUP BY store_id
             ),
             submitted AS (
                SELECT p.store_id,
                       COUNT(*) AS total_coupons,
                       COUNT(*) FILTER (WHERE c.status = 'approved') AS approved_coupons,
                       COUNT(*) FILTER (
                           WHERE c.status = 'approved' AND c.created_at >= $2 AND c.created_at < $3
                       ) AS current_week_approved,
                       COUNT(*) FILTER (
                           WHERE c.status = 'approved' AND c.created_at >= $1 AND c.created_at < $2
                       ) AS previous_week_approved
                FROM coupons c
                JOIN profiles p ON p.id = c.user_id
                WHERE p.store_id IS NOT NULL
                GROUP BY p.store_id
             ),
             completed AS (
                SELECT p.store_id, COUNT(*) AS goals_completed
                FROM goal_completions g
                JOIN profiles p ON p.id = g.user_id
                WHERE p.store_id IS NOT NULL
                GROUP BY p.store_id
             )
             SELECT s.id AS store_id,
                    s.name AS store_name,
                    s.cnpj,
                    s.location,
                    COALESCE(m.salesperson_count, 0)::BIGINT AS salesperson_count,
                    COALESCE(c.total_coupons, 0)::BIGINT AS total_coupons,
                    COALESCE(c.approved_coupons, 0)::BIGINT AS approved_coupons,
                    COALESCE(m.total_points, 0)::BIGINT AS total_points,
                    COALESCE(g.goals_completed, 0)::BIGINT AS goals_completed,
                    COALESCE(c.current_week_approved, 0)::BIGINT AS current_week_approved,
                    COALESCE(c.previous_week_approved, 0)::BIGINT AS previous_week_approved
             FROM stores s
             LEFT JOIN members m ON m.store_id = s.id
             LEFT JOIN submitted c ON c.store_id = s.id
             LEFT JOIN completed g ON g.store_id = s.id
             ORDER BY total_points DESC, s.name ASC, s.id ASC",
        )
        .bind(previous_week_start)
        .bind(week_start)
        .bind(week_end)
        .fetch_all(pool)
        .await
    }
}
