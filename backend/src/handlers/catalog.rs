//! HTTP handlers for product and warehouse catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::CatalogService;
use crate::AppState;
use shared::models::{
    CreateProductInput, CreateWarehouseInput, Product, Warehouse,
};

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = CatalogService::new(state.ledger);
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.ledger);
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Get a product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.ledger);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Create a warehouse
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(input): Json<CreateWarehouseInput>,
) -> AppResult<(StatusCode, Json<Warehouse>)> {
    let service = CatalogService::new(state.ledger);
    let warehouse = service.create_warehouse(input).await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

/// List all warehouses
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Warehouse>>> {
    let service = CatalogService::new(state.ledger);
    let warehouses = service.list_warehouses().await?;
    Ok(Json(warehouses))
}

/// Get a warehouse by id
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<Warehouse>> {
    let service = CatalogService::new(state.ledger);
    let warehouse = service.get_warehouse(warehouse_id).await?;
    Ok(Json(warehouse))
}
