/*
 * Responsibility
 * - pull the bearer credential out of `Authorization` (header extraction only, no validation)
 * - anything that is not `Bearer <non-empty token>` is NoCredential and never reaches the identity service
 */
use axum::http::{HeaderMap, header};

use crate::services::identity::{AuthError, Credential};

pub fn extract_credential(headers: &HeaderMap) -> Result<Credential, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::NoCredential)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::NoCredential)?;

    // auth-scheme is case-insensitive (RFC 7235)
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::NoCredential);
    }

    Credential::new(token.trim()).ok_or(AuthError::NoCredential)
}
