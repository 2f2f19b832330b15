//! Warehouse models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A physical storage location with a fixed capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    /// Maximum total quantity this warehouse can hold, in product units
    pub capacity: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a warehouse
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWarehouseInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub capacity: Decimal,
}
