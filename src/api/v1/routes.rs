/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は認証なし、/orders と /users は Bearer 必須 (route_layer 相当を middleware::auth で適用)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, orders::find_order, users::find_me};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/orders/{order_id}", get(find_order))
        .route("/users/me", get(find_me));

    Router::new()
        .route("/health", get(health))
        .merge(middleware::auth::access::apply(protected, state))
}
