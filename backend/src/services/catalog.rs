//! Catalog service for products and warehouses

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;
use shared::models::{CreateProductInput, CreateWarehouseInput, Product, Warehouse};
use shared::validation::{validate_capacity, validate_unit_price};

/// Catalog service for master data
#[derive(Clone)]
pub struct CatalogService {
    ledger: Arc<Ledger>,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Err(message) = validate_unit_price(input.reference_price) {
            return Err(AppError::Validation {
                field: "reference_price".to_string(),
                message: message.to_string(),
                message_th: "ราคาอ้างอิงต้องเป็นค่าบวก".to_string(),
            });
        }

        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            unit: input.unit,
            reference_price: input.reference_price,
            created_at: Utc::now(),
        };
        self.ledger.insert_product(product.clone()).await;

        Ok(product)
    }

    /// List all products
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.ledger.list_products().await)
    }

    /// Get a product by id
    pub async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.ledger
            .get_product(id)
            .await
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Register a warehouse and its empty stock partition
    pub async fn create_warehouse(&self, input: CreateWarehouseInput) -> AppResult<Warehouse> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Err(message) = validate_capacity(input.capacity) {
            return Err(AppError::Validation {
                field: "capacity".to_string(),
                message: message.to_string(),
                message_th: "ความจุต้องเป็นค่าบวก".to_string(),
            });
        }

        let warehouse = Warehouse {
            id: Uuid::new_v4(),
            name: input.name,
            location: input.location,
            capacity: input.capacity,
            created_at: Utc::now(),
        };
        self.ledger.register_warehouse(warehouse.clone()).await;

        Ok(warehouse)
    }

    /// List all warehouses
    pub async fn list_warehouses(&self) -> AppResult<Vec<Warehouse>> {
        Ok(self.ledger.list_warehouses().await)
    }

    /// Get a warehouse by id
    pub async fn get_warehouse(&self, id: Uuid) -> AppResult<Warehouse> {
        self.ledger
            .get_warehouse(id)
            .await
            .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))
    }
}
