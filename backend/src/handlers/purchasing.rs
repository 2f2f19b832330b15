//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::PurchasingService;
use crate::AppState;
use shared::models::{CreatePurchaseOrderInput, PurchaseOrder};

/// Create a purchase order
pub async fn create_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<(StatusCode, Json<PurchaseOrder>)> {
    let service = PurchasingService::new(state.ledger);
    let order = service
        .create_order(current_user.0.employee_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List all purchase orders
pub async fn list_purchase_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    let service = PurchasingService::new(state.ledger);
    let orders = service.list_orders().await?;
    Ok(Json(orders))
}

/// List purchase orders that are paid but not yet received
pub async fn list_pending_receipts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    let service = PurchasingService::new(state.ledger);
    let orders = service.pending_receipts().await?;
    Ok(Json(orders))
}

/// Get a purchase order by id
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchasingService::new(state.ledger);
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}

/// Confirm payment for a purchase order
pub async fn pay_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchasingService::new(state.ledger);
    let order = service
        .confirm_payment(order_id, current_user.0.employee_id)
        .await?;
    Ok(Json(order))
}

/// Receive goods for a purchase order into its warehouse
pub async fn receive_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchasingService::new(state.ledger);
    let order = service
        .receive(order_id, current_user.0.employee_id)
        .await?;
    Ok(Json(order))
}
