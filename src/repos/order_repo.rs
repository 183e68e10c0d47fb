/*
 * Responsibility
 * - order book storage, in process (durable persistence belongs to another service)
 * - rows are cloned out; the lock is never held across an await outside this module
 * - delivered / cancelled orders are closed: their status can no longer change
 */
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

#[derive(Debug, Clone)]
pub struct OrderItemRow {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub items: Vec<OrderItemRow>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub items: Vec<OrderItemRow>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct OrderRepo {
    rows: Arc<RwLock<HashMap<Uuid, OrderRow>>>,
}

impl OrderRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub async fn list(&self, limit: usize, offset: usize) -> Vec<OrderRow> {
        let rows = self.rows.read().await;
        let mut out: Vec<OrderRow> = rows.values().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        out.into_iter().skip(offset).take(limit).collect()
    }

    pub async fn create(&self, new: NewOrder) -> OrderRow {
        let now = Utc::now();
        let row = OrderRow {
            id: Uuid::new_v4(),
            customer_name: new.customer_name,
            items: new.items,
            status: OrderStatus::Pending,
            notes: new.notes,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        };

        self.rows.write().await.insert(row.id, row.clone());
        row
    }

    pub async fn get(&self, id: Uuid) -> Option<OrderRow> {
        self.rows.read().await.get(&id).cloned()
    }

    /// `Ok(None)` when the order does not exist.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<OrderRow>, RepoError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };

        if row.status.is_closed() {
            return Err(RepoError::OrderClosed { status: row.status });
        }

        row.status = status;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.rows.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_order(name: &str) -> NewOrder {
        NewOrder {
            customer_name: name.to_string(),
            items: vec![OrderItemRow {
                product_id: Uuid::new_v4(),
                quantity: 2,
            }],
            notes: None,
            created_by: Some("chef".to_string()),
        }
    }

    #[tokio::test]
    async fn created_orders_start_pending() {
        let repo = OrderRepo::new();
        let row = repo.create(new_order("table 4")).await;

        assert_eq!(row.status, OrderStatus::Pending);
        assert_eq!(repo.get(row.id).await.unwrap().customer_name, "table 4");
    }

    #[tokio::test]
    async fn closed_orders_reject_status_changes() {
        let repo = OrderRepo::new();
        let row = repo.create(new_order("table 4")).await;

        repo.update_status(row.id, OrderStatus::Cancelled)
            .await
            .unwrap()
            .unwrap();
        let err = repo
            .update_status(row.id, OrderStatus::Preparing)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RepoError::OrderClosed {
                status: OrderStatus::Cancelled
            }
        ));
    }

    #[tokio::test]
    async fn unknown_order_update_is_none() {
        let repo = OrderRepo::new();
        let res = repo
            .update_status(Uuid::new_v4(), OrderStatus::Ready)
            .await
            .unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn list_pages_results() {
        let repo = OrderRepo::new();
        for i in 0..3 {
            repo.create(new_order(&format!("table {i}"))).await;
        }

        assert_eq!(repo.list(2, 0).await.len(), 2);
        assert_eq!(repo.list(2, 2).await.len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let repo = OrderRepo::new();
        let row = repo.create(new_order("table 4")).await;

        assert!(repo.delete(row.id).await);
        assert!(!repo.delete(row.id).await);
    }
}
