//! Request-scoped values of the auth pipeline: the bearer credential, the identity returned by
//! the identity service, and the permission a route requires.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer token taken from `Authorization: Bearer <token>`.
///
/// Lives for one request only. `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty (or whitespace-only) token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// User record returned by `GET /api/v1/auth/me` on the identity service.
///
/// Only `permissions` is interpreted here; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub permissions: BTreeSet<String>,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Identity {
    /// Exact, case-sensitive membership. No wildcard or prefix matching.
    pub fn has_permission(&self, permission: &RequiredPermission) -> bool {
        self.permissions.contains(permission.as_str())
    }

    /// Best-effort label for audit fields (`username`, then `email`, then `id`).
    pub fn display_name(&self) -> Option<String> {
        ["username", "email", "id"]
            .iter()
            .find_map(|key| match self.attributes.get(*key)? {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Permission a protected operation requires, fixed when the route is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequiredPermission(Cow<'static, str>);

impl RequiredPermission {
    pub const fn new(permission: &'static str) -> Self {
        Self(Cow::Borrowed(permission))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequiredPermission {
    fn from(permission: String) -> Self {
        Self(Cow::Owned(permission))
    }
}

impl fmt::Display for RequiredPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
