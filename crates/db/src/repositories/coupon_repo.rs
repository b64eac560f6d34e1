//! Repository for the `coupons` table (the reward ledger).

use loyalty_core::coupon::CouponStatus;
use loyalty_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::coupon::{Coupon, CouponFilter, CreateCoupon};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, campaign_id, image_url, status, extracted_data, \
    points_awarded, created_at, reviewed_at, reviewed_by";

/// Provides ledger writes and the counts the settlement engine relies on.
pub struct CouponRepo;

impl CouponRepo {
    /// Insert a new coupon. Always `pending` with zero points.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateCoupon,
    ) -> Result<Coupon, sqlx::Error> {
        let query = format!(
            "INSERT INTO coupons (user_id, campaign_id, image_url, extracted_data, status, points_awarded)
             VALUES ($1, $2, $3, $4, 'pending', 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(input.user_id)
            .bind(input.campaign_id)
            .bind(&input.image_url)
            .bind(&input.extracted_data)
            .fetch_one(executor)
            .await
    }

    /// Find a coupon by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coupons WHERE id = $1");
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a coupon and lock its row until the transaction ends.
    pub async fn lock_for_review<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coupons WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Record a review outcome on a still-pending coupon.
    ///
    /// The `status = 'pending'` guard makes this a compare-and-swap: returns
    /// `None` when the coupon is missing or was already reviewed.
    pub async fn apply_review<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: CouponStatus,
        points_awarded: i32,
        reviewed_by: DbId,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!(
            "UPDATE coupons SET
                status = $2,
                points_awarded = $3,
                reviewed_at = NOW(),
                reviewed_by = $4
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(points_awarded)
            .bind(reviewed_by)
            .fetch_optional(executor)
            .await
    }

    /// List coupons matching `filter`, newest first.
    pub async fn list(pool: &PgPool, filter: &CouponFilter) -> Result<Vec<Coupon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coupons
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL OR campaign_id = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(filter.user_id)
            .bind(filter.campaign_id)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }

    /// Count a user's approved coupons in a campaign submitted within
    /// `[from, until)`.
    ///
    /// Goal progress is keyed on submission time (`created_at`), not review
    /// time.
    pub async fn count_approved_between<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        campaign_id: DbId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM coupons
             WHERE user_id = $1 AND campaign_id = $2 AND status = 'approved'
               AND created_at >= $3 AND created_at < $4",
        )
        .bind(user_id)
        .bind(campaign_id)
        .bind(from)
        .bind(until)
        .fetch_one(executor)
        .await
    }

    /// Sum of points awarded across all of a user's approved coupons.
    ///
    /// Reconciliation support for tests: together with
    /// [`GoalCompletionRepo::sum_bonus_points`](super::GoalCompletionRepo::sum_bonus_points)
    /// it recomputes `profiles.total_points` from the ledger. No request path
    /// calls it.
    pub async fn sum_approved_points(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let sum: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(points_awarded)::BIGINT FROM coupons
             WHERE user_id = $1 AND status = 'approved'",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(sum.unwrap_or(0))
    }
}
