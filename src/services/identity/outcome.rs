//! Outcomes of the delegated auth pipeline and the error taxonomy they collapse into.

use thiserror::Error;

use super::types::{Identity, RequiredPermission};

/// Result of asking the identity service about one credential.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Authenticated(Identity),
    Unauthenticated,
    UpstreamUnavailable,
}

/// Result of gating an operation on one permission.
///
/// Failure variants of [`ValidationOutcome`] pass through unchanged; `Forbidden` is the only
/// outcome the gate adds.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorizationOutcome {
    Authorized(Identity),
    Forbidden,
    Unauthenticated,
    UpstreamUnavailable,
}

/// Terminal rejections of the pipeline. Mutually exclusive, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("not authenticated")]
    NoCredential,

    #[error("invalid authentication credentials")]
    Unauthenticated,

    #[error("authentication service unavailable")]
    UpstreamUnavailable,

    #[error("permission denied: {permission} required")]
    Forbidden { permission: RequiredPermission },
}

impl ValidationOutcome {
    pub fn into_result(self) -> Result<Identity, AuthError> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            Self::Unauthenticated => Err(AuthError::Unauthenticated),
            Self::UpstreamUnavailable => Err(AuthError::UpstreamUnavailable),
        }
    }
}

impl AuthorizationOutcome {
    /// `permission` is only used to describe a `Forbidden` outcome.
    pub fn into_result(self, permission: &RequiredPermission) -> Result<Identity, AuthError> {
        match self {
            Self::Authorized(identity) => Ok(identity),
            Self::Forbidden => Err(AuthError::Forbidden {
                permission: permission.clone(),
            }),
            Self::Unauthenticated => Err(AuthError::Unauthenticated),
            Self::UpstreamUnavailable => Err(AuthError::UpstreamUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_message_names_the_permission() {
        let err = AuthorizationOutcome::Forbidden
            .into_result(&RequiredPermission::new("orders:manage"))
            .unwrap_err();

        assert_eq!(err.to_string(), "permission denied: orders:manage required");
    }

    #[test]
    fn validation_failures_map_one_to_one() {
        assert_eq!(
            ValidationOutcome::Unauthenticated.into_result(),
            Err(AuthError::Unauthenticated)
        );
        assert_eq!(
            ValidationOutcome::UpstreamUnavailable.into_result(),
            Err(AuthError::UpstreamUnavailable)
        );
    }
}
