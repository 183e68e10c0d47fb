/*
 * Responsibility
 * - /orders handlers
 * - every route here sits behind a permission gate (see routes.rs); handlers only see the
 *   already-authorized identity
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::orders::{
            CreateOrderRequest, ListOrdersQuery, OrderResponse, UpdateOrderStatusRequest,
        },
        extractors::CurrentIdentity,
    },
    error::AppError,
    repos::order_repo::NewOrder,
    state::AppState,
};

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Json<Vec<OrderResponse>> {
    let rows = state.orders.list(query.limit(), query.offset()).await;
    Json(rows.into_iter().map(OrderResponse::from).collect())
}

pub async fn create_order(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let row = state
        .orders
        .create(NewOrder {
            items: req.item_rows(),
            customer_name: req.customer_name.trim().to_string(),
            notes: req.notes,
            created_by: identity.display_name(),
        })
        .await;

    tracing::info!(
        order_id = %row.id,
        created_by = row.created_by.as_deref().unwrap_or("-"),
        "order created"
    );

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let row = state
        .orders
        .get(order_id)
        .await
        .ok_or(AppError::not_found("order"))?;

    Ok(Json(row.into()))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let row = state
        .orders
        .update_status(order_id, req.status)
        .await?
        .ok_or(AppError::not_found("order"))?;

    Ok(Json(row.into()))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.orders.delete(order_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("order"))
    }
}
