//! HTTP-level tests for the coupon, goal, ticket, draw and leaderboard
//! endpoints.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get_auth, post_json_auth, user_token};
use sqlx::PgPool;

async fn submit(pool: &PgPool, token: &str, campaign_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/coupons",
        token,
        serde_json::json!({
            "campaign_id": campaign_id,
            "image_url": "https://cdn.example.com/receipt.jpg",
            "extracted_data": {
                "store": "North",
                "total": 42.5,
                "matched_keywords": ["coffee", "coffee"]
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn review(
    pool: &PgPool,
    token: &str,
    coupon_id: i64,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, &format!("/api/v1/coupons/{coupon_id}/review"), token, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_then_approve_returns_settlement(pool: PgPool) {
    let admin = admin_token(common::seed_admin(&pool).await);
    let user = common::seed_user(&pool, "ana@example.com").await;
    let campaign = common::seed_campaign(&pool, common::weekly_goal_settings()).await;
    let coupon = submit(&pool, &user_token(user), campaign).await;

    let (status, json) = review(
        &pool,
        &admin,
        coupon,
        serde_json::json!({ "status": "approved", "points_awarded": 25 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["coupon"]["status"], "approved");
    assert_eq!(json["data"]["coupon"]["points_awarded"], 25);
    assert_eq!(json["data"]["coupon"]["extracted_data"]["matched_keywords"], serde_json::json!(["coffee"]));
    assert_eq!(json["data"]["total_points"], 25);
    assert_eq!(json["data"]["goal_completions"], serde_json::json!([]));

    let (status, json) = review(&pool, &admin, coupon, serde_json::json!({ "status": "rejected" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn review_rejects_unknown_status(pool: PgPool) {
    let admin = admin_token(common::seed_admin(&pool).await);
    let user = common::seed_user(&pool, "ana@example.com").await;
    let campaign = common::seed_campaign(&pool, serde_json::json!({})).await;
    let coupon = submit(&pool, &user_token(user), campaign).await;

    let (status, _) = review(&pool, &admin, coupon, serde_json::json!({ "status": "pending" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_to_inactive_campaign_returns_400(pool: PgPool) {
    let user = common::seed_user(&pool, "ana@example.com").await;
    let campaign = common::seed_campaign(&pool, serde_json::json!({})).await;
    sqlx::query("UPDATE campaigns SET is_active = false WHERE id = $1")
        .bind(campaign)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/coupons",
        &user_token(user),
        serde_json::json!({ "campaign_id": campaign, "image_url": "https://cdn.example.com/r.jpg" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn users_only_see_their_own_coupons(pool: PgPool) {
    let admin = admin_token(common::seed_admin(&pool).await);
    let ana = common::seed_user(&pool, "ana@example.com").await;
    let bia = common::seed_user(&pool, "bia@example.com").await;
    let campaign = common::seed_campaign(&pool, serde_json::json!({})).await;
    let ana_coupon = submit(&pool, &user_token(ana), campaign).await;
    submit(&pool, &user_token(bia), campaign).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/coupons", &user_token(ana)).await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], ana_coupon);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/coupons?status=pending", &admin).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/coupons/{ana_coupon}"), &user_token(bia)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/coupons?status=flagged", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn goal_progress_tickets_and_draw_over_http(pool: PgPool) {
    let admin = admin_token(common::seed_admin(&pool).await);
    let user = common::seed_user(&pool, "ana@example.com").await;
    let token = user_token(user);
    let campaign = common::seed_campaign(&pool, common::weekly_goal_settings()).await;

    for _ in 0..5 {
        let coupon = submit(&pool, &token, campaign).await;
        let (status, _) = review(&pool, &admin, coupon, serde_json::json!({ "status": "approved" })).await;
        assert_eq!(status, StatusCode::OK);
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(app, &format!("/api/v1/goals/progress?campaign_id={campaign}"), &token).await,
    )
    .await;
    let goal = &json["data"][0];
    assert_eq!(goal["current_count"], 5);
    assert_eq!(goal["percentage"], 100);
    assert_eq!(goal["is_completed"], true);
    assert_eq!(goal["completion"]["bonus_points_awarded"], 20);

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(app, &format!("/api/v1/lucky-numbers?campaign_id={campaign}"), &token).await,
    )
    .await;
    let numbers: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);

    // draw_count defaults to 1.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/draws",
        &admin,
        serde_json::json!({ "campaign_id": campaign }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["winners"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["eligible_count"], 2);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/draws",
        &admin,
        serde_json::json!({ "campaign_id": campaign, "draw_count": 10 }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["winners"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/draws",
        &admin,
        serde_json::json!({ "campaign_id": campaign }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "INSUFFICIENT_POOL");

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(app, &format!("/api/v1/leaderboard?campaign_id={campaign}"), &token).await,
    )
    .await;
    assert_eq!(json["data"][0]["user_id"], user);
    assert_eq!(json["data"][0]["rank"], 1);
    assert_eq!(json["data"][0]["campaign_points"], 70);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn users_cannot_read_other_users_progress(pool: PgPool) {
    let ana = common::seed_user(&pool, "ana@example.com").await;
    let bia = common::seed_user(&pool, "bia@example.com").await;
    let campaign = common::seed_campaign(&pool, common::weekly_goal_settings()).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/goals/progress?campaign_id={campaign}&user_id={bia}"),
        &user_token(ana),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
