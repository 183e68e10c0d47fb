/*
 * Responsibility
 * - /orders request/response DTOs
 * - shape checks live in validate(); existence / state checks belong to the repo
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::order_repo::{OrderItemRow, OrderRow, OrderStatus};

const MAX_CUSTOMER_NAME_CHARS: usize = 120;
const MAX_NOTES_CHARS: usize = 500;
const MAX_ITEM_QUANTITY: u32 = 100;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.customer_name.trim().is_empty() {
            return Err("customer_name is required");
        }
        if self.customer_name.chars().count() > MAX_CUSTOMER_NAME_CHARS {
            return Err("customer_name must be <= 120 chars");
        }
        if self.items.is_empty() {
            return Err("items must not be empty");
        }
        if self
            .items
            .iter()
            .any(|item| item.quantity == 0 || item.quantity > MAX_ITEM_QUANTITY)
        {
            return Err("quantity must be between 1 and 100");
        }
        if let Some(notes) = &self.notes
            && notes.chars().count() > MAX_NOTES_CHARS
        {
            return Err("notes must be <= 500 chars");
        }

        Ok(())
    }

    pub fn item_rows(&self) -> Vec<OrderItemRow> {
        self.items
            .iter()
            .map(|item| OrderItemRow {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListOrdersQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub items: Vec<OrderItemResponse>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRow> for OrderResponse {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            customer_name: row.customer_name,
            items: row
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            status: row.status,
            notes: row.notes,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
