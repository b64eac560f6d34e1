//! Route definitions for the `/campaigns` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /        -> list_campaigns
/// POST   /        -> create_campaign (admin)
/// GET    /{id}    -> get_campaign
/// PUT    /{id}    -> update_campaign (admin)
/// DELETE /{id}    -> delete_campaign (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campaign::list_campaigns).post(campaign::create_campaign),
        )
        .route(
            "/{id}",
            get(campaign::get_campaign)
                .put(campaign::update_campaign)
                .delete(campaign::delete_campaign),
        )
}
