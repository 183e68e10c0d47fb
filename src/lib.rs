/*
 * Responsibility
 * - crate root for the orders service
 * - exposes app::build_router / app::build_state so integration tests can drive the router in-process
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
