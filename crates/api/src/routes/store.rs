//! Route definitions for the `/stores` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::store;
use crate::state::AppState;

/// Routes mounted at `/stores`.
///
/// ```text
/// GET    /        -> list_stores
/// POST   /        -> create_store (admin)
/// GET    /{id}    -> get_store
/// PATCH  /{id}    -> update_store (admin)
/// DELETE /{id}    -> delete_store (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(store::list_stores).post(store::create_store))
        .route(
            "/{id}",
            get(store::get_store)
                .patch(store::update_store)
                .delete(store::delete_store),
        )
}
