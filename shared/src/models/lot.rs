//! Inventory lot models
//!
//! A lot is an immutable receipt of stock into a warehouse at a known
//! unit cost. Lots are only created by receiving a purchase order and
//! are drained oldest-first when sales orders ship.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A batch of stock received into a warehouse at a single unit cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    pub id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    /// The purchase order line this lot was received from
    pub purchase_order_line_id: Uuid,
    pub received_at: DateTime<Utc>,
    /// Tie-breaker for lots received at the same instant; assigned
    /// monotonically per warehouse and never reused
    pub sequence: u64,
    pub original_quantity: Decimal,
    /// Acquisition cost per unit, fixed at receipt
    pub unit_cost: Decimal,
    pub remaining_quantity: Decimal,
}

impl Lot {
    pub fn is_exhausted(&self) -> bool {
        self.remaining_quantity <= Decimal::ZERO
    }

    pub fn consumed_quantity(&self) -> Decimal {
        self.original_quantity - self.remaining_quantity
    }

    /// Takes up to `requested` units from this lot, returning the amount
    /// actually taken. Never takes more than remains.
    pub fn take(&mut self, requested: Decimal) -> Decimal {
        let taken = requested.min(self.remaining_quantity);
        self.remaining_quantity -= taken;
        taken
    }
}
