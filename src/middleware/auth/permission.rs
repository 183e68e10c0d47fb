//! Authentication plus one required permission, bound when the route is registered.
//!
//! The wrapped handler only runs for `AuthorizationOutcome::Authorized`; every other outcome
//! is answered here.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::middleware::bearer_auth;
use crate::services::identity::{PermissionGate, RequiredPermission};
use crate::state::AppState;

/// Gate `route` on `permission`.
///
/// ```ignore
/// .route("/orders", permission::require(get(list_orders), &state, ORDERS_VIEW))
/// ```
pub fn require<S>(
    route: MethodRouter<S>,
    state: &AppState,
    permission: RequiredPermission,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(
        state.gate(permission),
        permission_middleware,
    ))
}

async fn permission_middleware(
    State(gate): State<PermissionGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let credential = bearer_auth::extract_credential(req.headers()).inspect_err(|_| {
        tracing::debug!(permission = %gate.permission(), "request without bearer credential");
    })?;

    let response = gate
        .guard(&credential, |identity| async move {
            req.extensions_mut().insert(identity);
            next.run(req).await
        })
        .await?;

    Ok(response)
}
