/*
 * Responsibility
 * - public surface of the middleware layer
 * - auth: per-route authentication / permission gates
 * - http: cross-cutting transport layers (request id, tracing, limits)
 */
pub mod auth;
pub mod bearer_auth;
pub mod http;
