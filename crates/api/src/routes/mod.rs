pub mod campaign;
pub mod coupon;
pub mod draw;
pub mod goals;
pub mod health;
pub mod leaderboard;
pub mod lucky_number;
pub mod notification;
pub mod store;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /campaigns                       list, create (admin)
/// /campaigns/{id}                  get, update, delete (admin)
///
/// /stores                          list, create (admin)
/// /stores/{id}                     get, update, delete (admin)
///
/// /coupons                         list (own; all for admins), submit
/// /coupons/{id}                    get (owner or admin)
/// /coupons/{id}/review             review (admin)
///
/// /goals/progress                  period progress for a campaign
///
/// /lucky-numbers                   list (own; all for admins)
///
/// /draws                           execute a draw (admin)
///
/// /leaderboard                     ranked campaign leaderboard
/// /store-performance               per-store aggregates (admin)
///
/// /notifications                   list
/// /notifications/read-all          mark all read
/// /notifications/unread-count      unread count
/// /notifications/{id}/read         mark one read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/campaigns", campaign::router())
        .nest("/stores", store::router())
        .nest("/coupons", coupon::router())
        .nest("/goals", goals::router())
        .nest("/lucky-numbers", lucky_number::router())
        .nest("/draws", draw::router())
        .nest("/leaderboard", leaderboard::router())
        .nest("/store-performance", leaderboard::store_performance_router())
        .nest("/notifications", notification::router())
}
