//! Route definitions for the `/lucky-numbers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::lucky_number;
use crate::state::AppState;

/// Routes mounted at `/lucky-numbers`.
///
/// ```text
/// GET    /?campaign_id=   -> list_lucky_numbers
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(lucky_number::list_lucky_numbers))
}
