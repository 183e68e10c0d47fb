/*
 * Responsibility
 * - public surface of v1 (routes() and the permission names routes are gated on)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{ORDERS_MANAGE, ORDERS_VIEW, routes};
