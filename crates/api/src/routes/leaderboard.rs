//! Route definitions for campaign leaderboards and store performance.

use axum::routing::get;
use axum::Router;

use crate::handlers::leaderboard;
use crate::state::AppState;

/// Routes mounted at `/leaderboard`.
///
/// ```text
/// GET    /?campaign_id=&store_id=   -> get_leaderboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(leaderboard::get_leaderboard))
}

/// Routes mounted at `/store-performance`.
///
/// ```text
/// GET    /    -> get_store_performance (admin)
/// ```
pub fn store_performance_router() -> Router<AppState> {
    Router::new().route("/", get(leaderboard::get_store_performance))
}
