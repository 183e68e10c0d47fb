/*
 * Responsibility
 * - GET /me: echo the identity the identity service resolved for this request
 * - authenticated only, no permission required
 */
use axum::Json;

use crate::api::v1::extractors::CurrentIdentity;
use crate::services::identity::Identity;

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<Identity> {
    Json(identity)
}
