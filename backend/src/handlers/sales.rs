//! HTTP handlers for sales order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::SalesService;
use crate::AppState;
use shared::models::{CostRecord, CreateSalesOrderInput, ReturnEvent, SalesOrder};

/// Create a sales order
pub async fn create_sales_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSalesOrderInput>,
) -> AppResult<(StatusCode, Json<SalesOrder>)> {
    let service = SalesService::new(state.ledger);
    let order = service
        .create_order(current_user.0.employee_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List all sales orders
pub async fn list_sales_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SalesOrder>>> {
    let service = SalesService::new(state.ledger);
    let orders = service.list_orders().await?;
    Ok(Json(orders))
}

/// Get a sales order by id
pub async fn get_sales_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesService::new(state.ledger);
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}

/// Ship a sales order, consuming stock in FIFO order
pub async fn ship_sales_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesService::new(state.ledger);
    let order = service.ship(order_id, current_user.0.employee_id).await?;
    Ok(Json(order))
}

/// Confirm delivery of a shipped sales order
pub async fn confirm_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesService::new(state.ledger);
    let order = service
        .confirm_delivery(order_id, current_user.0.employee_id)
        .await?;
    Ok(Json(order))
}

/// Request a return for a delivered sales order
pub async fn request_return(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesService::new(state.ledger);
    let order = service
        .request_return(order_id, current_user.0.employee_id)
        .await?;
    Ok(Json(order))
}

/// Confirm returned goods back into the warehouse
pub async fn confirm_return(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesService::new(state.ledger);
    let order = service
        .confirm_return(order_id, current_user.0.employee_id)
        .await?;
    Ok(Json(order))
}

/// Confirm payment for a sales order
pub async fn pay_sales_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesService::new(state.ledger);
    let order = service
        .confirm_payment(order_id, current_user.0.employee_id)
        .await?;
    Ok(Json(order))
}

/// Get the FIFO cost records written when an order shipped
pub async fn get_cost_records(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Vec<CostRecord>>> {
    let service = SalesService::new(state.ledger);
    let records = service.cost_records(order_id).await?;
    Ok(Json(records))
}

/// Get the return events written when an order's return was confirmed
pub async fn get_return_events(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReturnEvent>>> {
    let service = SalesService::new(state.ledger);
    let events = service.return_events(order_id).await?;
    Ok(Json(events))
}
