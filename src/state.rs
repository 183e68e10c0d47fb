/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 *   - validator: delegated token validation (identity service client, built once at startup)
 *   - orders: order book
 * - cheap to Clone (Arc inside); holds no per-request state
 */
use std::sync::Arc;

use crate::repos::order_repo::OrderRepo;
use crate::services::identity::{PermissionGate, RequiredPermission, TokenValidator};

#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<dyn TokenValidator>,
    pub orders: OrderRepo,
}

impl AppState {
    pub fn new(validator: Arc<dyn TokenValidator>, orders: OrderRepo) -> Self {
        Self { validator, orders }
    }

    /// Gate bound to `permission`, sharing this state's validator.
    pub fn gate(&self, permission: RequiredPermission) -> PermissionGate {
        PermissionGate::new(self.validator.clone(), permission)
    }
}
