//! Stock query service
//!
//! Read-only views over the warehouse partitions: platform-wide levels,
//! per-warehouse summaries, and the lot pool itself. Each query locks
//! one partition at a time and copies what it needs, so queries never
//! hold a warehouse while touching another.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;
use shared::models::Lot;
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};

/// Stock query service
#[derive(Clone)]
pub struct StockService {
    ledger: Arc<Ledger>,
}

/// One product's stock position in one warehouse
#[derive(Debug, Clone, Serialize)]
pub struct StockLevelRow {
    pub warehouse_id: Uuid,
    pub warehouse_name: String,
    pub product_id: Uuid,
    pub product_name: String,
    /// Total units on hand, returned units included
    pub on_hand: Decimal,
    /// Units still backed by lots and available for sale
    pub sellable: Decimal,
    /// Returned units held outside the lot pool
    pub returned: Decimal,
}

/// One product's position within a warehouse summary
#[derive(Debug, Clone, Serialize)]
pub struct ProductStockSummary {
    pub product_id: Uuid,
    pub product_name: String,
    pub on_hand: Decimal,
    pub sellable: Decimal,
    pub returned: Decimal,
    /// Remaining-stock weighted average acquisition cost
    pub weighted_average_cost: Decimal,
}

/// Capacity and stock overview of one warehouse
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseSummary {
    pub warehouse_id: Uuid,
    pub name: String,
    pub location: String,
    pub capacity: Decimal,
    pub total_on_hand: Decimal,
    pub remaining_capacity: Decimal,
    pub products: Vec<ProductStockSummary>,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Stock levels for every product in every warehouse
    pub async fn stock_levels(&self) -> AppResult<Vec<StockLevelRow>> {
        let warehouses = self.ledger.list_warehouses().await;

        let mut raw = Vec::new();
        for warehouse in &warehouses {
            let stock = self.ledger.lock_stock(warehouse.id).await?;
            for (product_id, on_hand) in stock.levels() {
                raw.push((
                    warehouse.id,
                    warehouse.name.clone(),
                    *product_id,
                    *on_hand,
                    stock.sellable(*product_id),
                    stock.returned(*product_id),
                ));
            }
        }

        let names = self
            .ledger
            .product_names(raw.iter().map(|(_, _, product_id, ..)| *product_id))
            .await;

        let mut rows: Vec<_> = raw
            .into_iter()
            .map(
                |(warehouse_id, warehouse_name, product_id, on_hand, sellable, returned)| {
                    StockLevelRow {
                        warehouse_id,
                        warehouse_name,
                        product_id,
                        product_name: names
                            .get(&product_id)
                            .cloned()
                            .unwrap_or_else(|| product_id.to_string()),
                        on_hand,
                        sellable,
                        returned,
                    }
                },
            )
            .collect();
        rows.sort_by(|a, b| {
            a.warehouse_name
                .cmp(&b.warehouse_name)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });

        Ok(rows)
    }

    /// Capacity and per-product stock overview of one warehouse
    pub async fn warehouse_summary(&self, warehouse_id: Uuid) -> AppResult<WarehouseSummary> {
        let warehouse = self
            .ledger
            .get_warehouse(warehouse_id)
            .await
            .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))?;

        let (total_on_hand, raw) = {
            let stock = self.ledger.lock_stock(warehouse_id).await?;
            let raw: Vec<_> = stock
                .levels()
                .iter()
                .map(|(product_id, on_hand)| {
                    (
                        *product_id,
                        *on_hand,
                        stock.sellable(*product_id),
                        stock.returned(*product_id),
                        stock.weighted_average_cost(*product_id),
                    )
                })
                .collect();
            (stock.total_on_hand(), raw)
        };

        let names = self
            .ledger
            .product_names(raw.iter().map(|(product_id, ..)| *product_id))
            .await;

        let mut products: Vec<_> = raw
            .into_iter()
            .map(
                |(product_id, on_hand, sellable, returned, weighted_average_cost)| {
                    ProductStockSummary {
                        product_id,
                        product_name: names
                            .get(&product_id)
                            .cloned()
                            .unwrap_or_else(|| product_id.to_string()),
                        on_hand,
                        sellable,
                        returned,
                        weighted_average_cost,
                    }
                },
            )
            .collect();
        products.sort_by(|a, b| a.product_name.cmp(&b.product_name));

        Ok(WarehouseSummary {
            warehouse_id: warehouse.id,
            name: warehouse.name,
            location: warehouse.location,
            capacity: warehouse.capacity,
            total_on_hand,
            remaining_capacity: warehouse.capacity - total_on_hand,
            products,
        })
    }

    /// Lot pool of one warehouse, oldest first, one page at a time.
    /// Exhausted lots stay listed with a zero remainder.
    pub async fn lot_history(
        &self,
        warehouse_id: Uuid,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Lot>> {
        let stock = self.ledger.lock_stock(warehouse_id).await?;
        let lots = stock.lots();
        let total_items = lots.len() as u64;
        let data: Vec<Lot> = lots
            .iter()
            .skip(pagination.offset())
            .take(pagination.per_page.max(1) as usize)
            .cloned()
            .collect();

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(&pagination, total_items),
        })
    }
}
