//! Coupon submission model, DTOs and request bodies.

use loyalty_core::coupon::ExtractedData;
use loyalty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `coupons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coupon {
    pub id: DbId,
    pub user_id: DbId,
    pub campaign_id: DbId,
    pub image_url: String,
    pub status: String,
    pub extracted_data: Option<serde_json::Value>,
    pub points_awarded: i32,
    pub created_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
}

/// DTO for inserting a new pending coupon.
#[derive(Debug, Clone)]
pub struct CreateCoupon {
    pub user_id: DbId,
    pub campaign_id: DbId,
    pub image_url: String,
    pub extracted_data: Option<serde_json::Value>,
}

/// Request body for `POST /coupons`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitCouponRequest {
    pub campaign_id: DbId,
    pub image_url: String,
    pub extracted_data: Option<ExtractedData>,
}

/// Request body for `POST /coupons/{id}/review`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCouponRequest {
    pub status: String,
    pub points_awarded: Option<i32>,
}

/// Filters for listing coupons.
#[derive(Debug, Clone, Default)]
pub struct CouponFilter {
    pub user_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub status: Option<String>,
}
