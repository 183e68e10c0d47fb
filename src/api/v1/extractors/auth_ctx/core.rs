use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::identity::{AuthError, Identity};

/// Identity of the caller, inserted into request extensions by the auth middleware for this
/// request only.
///
/// Missing means the route was registered without an auth layer; that fails closed with 401.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| {
                tracing::error!(
                    uri = %parts.uri,
                    "no identity on request; route is missing an auth layer"
                );
                AppError::from(AuthError::NoCredential)
            })
    }
}
