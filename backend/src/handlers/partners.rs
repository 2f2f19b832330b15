//! HTTP handlers for supplier and customer endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::PartnerService;
use crate::AppState;
use shared::models::{
    CreateCustomerInput, CreateSupplierInput, Customer, Supplier,
};

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = PartnerService::new(state.ledger);
    let supplier = service.create_supplier(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// List all suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = PartnerService::new(state.ledger);
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}

/// Get a supplier by id
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = PartnerService::new(state.ledger);
    let supplier = service.get_supplier(supplier_id).await?;
    Ok(Json(supplier))
}

/// Create a customer
pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let service = PartnerService::new(state.ledger);
    let customer = service.create_customer(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// List all customers
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Customer>>> {
    let service = PartnerService::new(state.ledger);
    let customers = service.list_customers().await?;
    Ok(Json(customers))
}

/// Get a customer by id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<Customer>> {
    let service = PartnerService::new(state.ledger);
    let customer = service.get_customer(customer_id).await?;
    Ok(Json(customer))
}
