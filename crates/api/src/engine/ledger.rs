//! Coupon ledger: submission and the review settlement transaction.

use chrono::Utc;
use loyalty_core::campaign::accepts_submissions;
use loyalty_core::coupon::{ensure_reviewable, resolve_points, CouponStatus, ReviewDecision};
use loyalty_core::error::CoreError;
use loyalty_core::notification::coupon_reviewed;
use loyalty_core::types::DbId;
use loyalty_db::models::coupon::{Coupon, CreateCoupon, SubmitCouponRequest};
use loyalty_db::models::goal_completion::GoalCompletion;
use loyalty_db::models::lucky_number::LuckyNumber;
use loyalty_db::repositories::{CampaignRepo, CouponRepo, ProfileRepo};
use loyalty_db::DbPool;
use loyalty_events::NotificationEmitter;
use serde::Serialize;

use crate::engine::goals;
use crate::error::AppResult;

/// Result of a successful review.
#[derive(Debug, Serialize)]
pub struct ReviewOutcome {
    pub coupon: Coupon,
    /// The owner's `total_points` after the review and any goal bonuses.
    pub total_points: i64,
    /// Goal completions created by this review.
    pub goal_completions: Vec<GoalCompletion>,
    /// Tickets issued by those completions.
    pub lucky_numbers: Vec<LuckyNumber>,
}

/// Record a new pending coupon for `user_id`.
///
/// The campaign must exist, be active, and have a date window containing
/// today (UTC).
pub async fn submit(
    pool: &DbPool,
    user_id: DbId,
    input: SubmitCouponRequest,
) -> AppResult<Coupon> {
    if input.image_url.trim().is_empty() {
        return Err(CoreError::Validation("image_url is required".into()).into());
    }

    let campaign = CampaignRepo::find_by_id(pool, input.campaign_id)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!("Campaign {} does not exist", input.campaign_id))
        })?;

    let today = Utc::now().date_naive();
    if !accepts_submissions(campaign.is_active, campaign.start_date, campaign.end_date, today) {
        return Err(CoreError::Validation(format!(
            "Campaign {} is not accepting coupons",
            campaign.id
        ))
        .into());
    }

    let extracted_data = input
        .extracted_data
        .map(|data| serde_json::to_value(data.dedup_keywords()))
        .transpose()
        .map_err(|e| CoreError::Internal(format!("Failed to encode extracted data: {e}")))?;

    let coupon = CouponRepo::create(
        pool,
        &CreateCoupon {
            user_id,
            campaign_id: campaign.id,
            image_url: input.image_url,
            extracted_data,
        },
    )
    .await?;

    tracing::info!(
        coupon_id = coupon.id,
        user_id,
        campaign_id = campaign.id,
        "Coupon submitted"
    );

    Ok(coupon)
}

/// Review a pending coupon and settle every consequence atomically.
///
/// Within one transaction: lock the coupon, move it out of `pending`,
/// credit the owner's points, and re-evaluate the campaign's goals. After
/// commit the owner is notified of the decision and of any completed goal.
/// Reviewing a coupon that is no longer pending fails with
/// [`CoreError::Conflict`] and changes nothing.
pub async fn review(
    pool: &DbPool,
    emitter: &NotificationEmitter,
    coupon_id: DbId,
    reviewer_id: DbId,
    decision: ReviewDecision,
    awarded_points: Option<i32>,
) -> AppResult<ReviewOutcome> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let current = CouponRepo::lock_for_review(&mut *tx, coupon_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Coupon",
            id: coupon_id,
        })?;
    ensure_reviewable(CouponStatus::parse(&current.status)?)?;

    let campaign = CampaignRepo::find_by_id(&mut *tx, current.campaign_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Campaign",
            id: current.campaign_id,
        })?;
    let settings = campaign.parsed_settings().map_err(CoreError::Internal)?;
    let points = resolve_points(decision, awarded_points, &settings)?;

    let coupon =
        CouponRepo::apply_review(&mut *tx, coupon_id, decision.status(), points, reviewer_id)
            .await?
            .ok_or_else(|| CoreError::Conflict("This coupon has already been reviewed".into()))?;

    // The profile row is updated even for zero points: its row lock
    // serializes concurrent reviews of one user before goals are counted.
    let credited_total = ProfileRepo::add_points(&mut *tx, coupon.user_id, i64::from(points))
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            id: coupon.user_id,
        })?;

    let evaluation =
        goals::evaluate(&mut *tx, coupon.user_id, coupon.campaign_id, &settings, now).await?;

    tx.commit().await?;

    tracing::info!(
        coupon_id,
        user_id = coupon.user_id,
        campaign_id = coupon.campaign_id,
        reviewer_id,
        status = %coupon.status,
        points_awarded = coupon.points_awarded,
        goals_completed = evaluation.completions.len(),
        "Coupon reviewed"
    );

    let mut notifications = vec![coupon_reviewed(
        coupon.user_id,
        coupon.id,
        coupon.campaign_id,
        decision,
        coupon.points_awarded,
    )];
    notifications.extend(evaluation.notifications);
    emitter.emit_all(&notifications).await;

    Ok(ReviewOutcome {
        coupon,
        total_points: credited_total + evaluation.bonus_points,
        goal_completions: evaluation.completions,
        lucky_numbers: evaluation.lucky_numbers,
    })
}
