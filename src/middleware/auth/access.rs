//! Authentication without a permission requirement.
//!
//! Bearer credential -> identity service (`TokenValidator`) -> `Identity` into request
//! extensions. Handlers read it back through `CurrentIdentity`.

use std::sync::Arc;

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
use crate::services::identity::TokenValidator;
use crate::state::AppState;

/// Require a valid bearer credential on `route`.
///
/// ```ignore
/// .route("/me", middleware::auth::access::apply(get(me), &state))
/// ```
pub fn apply<S>(route: MethodRouter<S>, state: &AppState) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(
        state.validator.clone(),
        access_middleware,
    ))
}

async fn access_middleware(
    State(validator): State<Arc<dyn TokenValidator>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let credential = bearer_auth::extract_credential(req.headers()).inspect_err(|_| {
        tracing::debug!("request without bearer credential");
    })?;

    let identity = validator.validate(&credential).await.into_result()?;

    // middleware -> extractor
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
