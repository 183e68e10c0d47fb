/*
 * Responsibility
 * - meaning the order repo passes up to handlers
 */
use thiserror::Error;

use super::order_repo::OrderStatus;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("order is already {status:?}")]
    OrderClosed { status: OrderStatus },
}
