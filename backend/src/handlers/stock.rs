//! HTTP handlers for stock visibility endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::stock::{StockLevelRow, WarehouseSummary};
use crate::services::StockService;
use crate::AppState;
use shared::models::Lot;
use shared::types::{PaginatedResponse, Pagination};

/// Query parameters for lot history
#[derive(Debug, Deserialize)]
pub struct LotHistoryQuery {
    pub warehouse_id: Uuid,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Stock levels across every warehouse and product
pub async fn get_stock_levels(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StockLevelRow>>> {
    let service = StockService::new(state.ledger);
    let levels = service.stock_levels().await?;
    Ok(Json(levels))
}

/// Capacity and per-product summary for one warehouse
pub async fn get_warehouse_summary(
    State(state): State<AppState>,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<WarehouseSummary>> {
    let service = StockService::new(state.ledger);
    let summary = service.warehouse_summary(warehouse_id).await?;
    Ok(Json(summary))
}

/// Paginated lot history for a warehouse, oldest first
pub async fn get_lot_history(
    State(state): State<AppState>,
    Query(query): Query<LotHistoryQuery>,
) -> AppResult<Json<PaginatedResponse<Lot>>> {
    let defaults = Pagination::default();
    let pagination = Pagination {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    let service = StockService::new(state.ledger);
    let lots = service.lot_history(query.warehouse_id, pagination).await?;
    Ok(Json(lots))
}
