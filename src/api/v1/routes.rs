/*
 * Responsibility
 * - v1 URL layout
 * - which guard each operation gets is decided here, at registration time:
 *   public / authenticated (access) / permission-gated (permission::require)
 */
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::api::v1::handlers::{
    health::health,
    me::me,
    orders::{create_order, delete_order, get_order, list_orders, update_order_status},
};
use crate::middleware::auth::{access, permission::require};
use crate::services::identity::RequiredPermission;
use crate::state::AppState;

pub const ORDERS_VIEW: RequiredPermission = RequiredPermission::new("orders:view");
pub const ORDERS_MANAGE: RequiredPermission = RequiredPermission::new("orders:manage");

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/me", access::apply(get(me), state))
        .route(
            "/orders",
            require(get(list_orders), state, ORDERS_VIEW)
                .merge(require(post(create_order), state, ORDERS_MANAGE)),
        )
        .route(
            "/orders/{order_id}",
            require(get(get_order), state, ORDERS_VIEW)
                .merge(require(delete(delete_order), state, ORDERS_MANAGE)),
        )
        .route(
            "/orders/{order_id}/status",
            require(patch(update_order_status), state, ORDERS_MANAGE),
        )
}
