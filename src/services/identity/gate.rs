//! Permission gate: a [`RequiredPermission`] bound at route registration, checked against the
//! identity resolved for the current request.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::outcome::{AuthError, AuthorizationOutcome, ValidationOutcome};
use super::types::{Credential, Identity, RequiredPermission};
use super::validator::TokenValidator;

#[derive(Clone)]
pub struct PermissionGate {
    validator: Arc<dyn TokenValidator>,
    permission: RequiredPermission,
}

impl fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionGate")
            .field("permission", &self.permission)
            .finish_non_exhaustive()
    }
}

impl PermissionGate {
    pub fn new(validator: Arc<dyn TokenValidator>, permission: RequiredPermission) -> Self {
        Self {
            validator,
            permission,
        }
    }

    pub fn permission(&self) -> &RequiredPermission {
        &self.permission
    }

    /// Authenticates `credential` (one upstream call) and then tests the bound permission.
    /// Authentication failures are passed through; the permission is never tested without an
    /// identity.
    pub async fn check(&self, credential: &Credential) -> AuthorizationOutcome {
        match self.validator.validate(credential).await {
            ValidationOutcome::Authenticated(identity)
                if identity.has_permission(&self.permission) =>
            {
                AuthorizationOutcome::Authorized(identity)
            }
            ValidationOutcome::Authenticated(identity) => {
                tracing::info!(
                    permission = %self.permission,
                    user = identity.display_name().as_deref().unwrap_or("-"),
                    "permission denied"
                );
                AuthorizationOutcome::Forbidden
            }
            ValidationOutcome::Unauthenticated => AuthorizationOutcome::Unauthenticated,
            ValidationOutcome::UpstreamUnavailable => AuthorizationOutcome::UpstreamUnavailable,
        }
    }

    /// Runs `operation` with the authorized identity, or returns the rejection without
    /// invoking it.
    pub async fn guard<F, Fut, T>(
        &self,
        credential: &Credential,
        operation: F,
    ) -> Result<T, AuthError>
    where
        F: FnOnce(Identity) -> Fut,
        Fut: Future<Output = T>,
    {
        let identity = self.check(credential).await.into_result(&self.permission)?;
        Ok(operation(identity).await)
    }
}
