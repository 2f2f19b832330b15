//! In-memory inventory ledger
//!
//! Stock is partitioned per warehouse. Every partition is guarded by
//! its own async mutex, so receipts and shipments touching the same
//! warehouse serialize while other warehouses proceed untouched. Lock
//! acquisition is bounded; a caller that cannot get the partition in
//! time is told to retry rather than queueing forever.
//!
//! Lock order is fixed: a task takes the warehouse partition first and
//! an entity map second, never the other way around.

mod fifo;
mod stock;
mod store;

pub use fifo::{drain, Consumption, LineDemand};
pub use stock::{IncomingLine, ReturnedLine, WarehouseStock};
pub use store::Ledger;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Stock-level failure inside a warehouse partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("warehouse capacity exceeded")]
    CapacityExceeded {
        capacity: Decimal,
        current: Decimal,
        requested: Decimal,
    },
    #[error("stock exhausted for product {product_id}")]
    Exhausted {
        product_id: Uuid,
        requested: Decimal,
        available: Decimal,
    },
}
