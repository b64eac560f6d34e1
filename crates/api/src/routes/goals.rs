//! Route definitions for goal progress.

use axum::routing::get;
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Routes mounted at `/goals`.
///
/// ```text
/// GET    /progress?campaign_id=   -> get_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/progress", get(goals::get_progress))
}
