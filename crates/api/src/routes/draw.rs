//! Route definitions for prize draws.

use axum::routing::post;
use axum::Router;

use crate::handlers::draw;
use crate::state::AppState;

/// Routes mounted at `/draws`.
///
/// ```text
/// POST   /    -> execute_draw (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(draw::execute_draw))
}
