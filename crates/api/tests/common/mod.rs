//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use loyalty_api::auth::jwt::{generate_access_token, JwtConfig};
use loyalty_api::config::ServerConfig;
use loyalty_api::router::build_app_router;
use loyalty_api::state::AppState;
use loyalty_core::campaign::CampaignSettings;
use loyalty_core::roles::{ROLE_ADMIN, ROLE_USER};
use loyalty_db::models::campaign::CreateCampaign;
use loyalty_db::models::profile::CreateProfile;
use loyalty_db::models::store::CreateStore;
use loyalty_db::repositories::{CampaignRepo, ProfileRepo, StoreRepo};
use loyalty_events::EventBus;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Application state backed by the test pool.
pub fn test_state(pool: PgPool) -> AppState {
    AppState::new(pool, test_config(), Arc::new(EventBus::default()))
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(test_state(pool), &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub fn admin_token(user_id: i64) -> String {
    token_for(user_id, ROLE_ADMIN)
}

pub fn user_token(user_id: i64) -> String {
    token_for(user_id, ROLE_USER)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn seed_store(pool: &PgPool, name: &str, cnpj: &str) -> i64 {
    StoreRepo::create(
        pool,
        &CreateStore {
            name: name.to_string(),
            cnpj: cnpj.to_string(),
            location: None,
            logo_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn seed_profile(pool: &PgPool, email: &str, role: &str, store_id: Option<i64>) -> i64 {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            full_name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role: role.to_string(),
            store_id,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    seed_profile(pool, email, ROLE_USER, None).await
}

pub async fn seed_admin(pool: &PgPool) -> i64 {
    seed_profile(pool, "admin@example.com", ROLE_ADMIN, None).await
}

/// An active campaign whose window spans today, with the given settings JSON.
pub async fn seed_campaign(pool: &PgPool, settings: serde_json::Value) -> i64 {
    let today = Utc::now().date_naive();
    CampaignRepo::create(
        pool,
        &CreateCampaign {
            title: "Summer receipts".to_string(),
            description: None,
            start_date: today - Duration::days(30),
            end_date: today + Duration::days(30),
            is_active: None,
            banner_url: None,
            keywords: vec!["coffee".to_string()],
            settings: CampaignSettings::from_json(&settings).unwrap(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Settings with one weekly goal of five approved coupons, worth 20 bonus
/// points and two tickets.
pub fn weekly_goal_settings() -> serde_json::Value {
    serde_json::json!({
        "points_per_coupon": 10,
        "has_draws": true,
        "draw_type": "random",
        "goals": [{
            "id": "w5",
            "label": "Five a week",
            "period": "weekly",
            "metric": "approved_coupons",
            "target": 5,
            "bonus_points": 20,
            "lucky_numbers": 2
        }]
    })
}
