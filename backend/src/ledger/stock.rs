//! Per-warehouse stock partition
//!
//! One `WarehouseStock` holds everything that must change together for
//! a warehouse: the lot pool, the aggregate level per product, and the
//! returned-goods buckets. The owning mutex lives in the ledger; all
//! methods here assume the caller already holds it.
//!
//! Aggregate invariant: for every product, the recorded level equals
//! the sum of its lot remainders plus its returned bucket. Mutations
//! either complete fully or leave the partition untouched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::Lot;
use uuid::Uuid;

use super::fifo::{drain, Consumption, LineDemand};
use super::StockError;

/// One product line arriving on a purchase order receipt
#[derive(Debug, Clone)]
pub struct IncomingLine {
    pub line_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

/// One product line coming back on a confirmed sales return
#[derive(Debug, Clone)]
pub struct ReturnedLine {
    pub product_id: Uuid,
    pub quantity: Decimal,
}

#[derive(Debug)]
pub struct WarehouseStock {
    warehouse_id: Uuid,
    capacity: Decimal,
    /// Lot pool ordered oldest first; exhausted lots stay for audit
    lots: Vec<Lot>,
    /// On-hand per product, returned units included
    levels: HashMap<Uuid, Decimal>,
    /// Returned units per product; never re-enter the lot pool
    returned: HashMap<Uuid, Decimal>,
    next_sequence: u64,
}

impl WarehouseStock {
    pub fn new(warehouse_id: Uuid, capacity: Decimal) -> Self {
        Self {
            warehouse_id,
            capacity,
            lots: Vec::new(),
            levels: HashMap::new(),
            returned: HashMap::new(),
            next_sequence: 0,
        }
    }

    pub fn warehouse_id(&self) -> Uuid {
        self.warehouse_id
    }

    pub fn capacity(&self) -> Decimal {
        self.capacity
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// On-hand quantity of one product, returned units included
    pub fn level(&self, product_id: Uuid) -> Decimal {
        self.levels.get(&product_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn returned(&self, product_id: Uuid) -> Decimal {
        self.returned
            .get(&product_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Quantity of one product that can still be sold. Returned units
    /// carry no usable cost basis and are excluded.
    pub fn sellable(&self, product_id: Uuid) -> Decimal {
        self.level(product_id) - self.returned(product_id)
    }

    /// Every product this partition has ever held, with its level
    pub fn levels(&self) -> &HashMap<Uuid, Decimal> {
        &self.levels
    }

    /// Total units in the warehouse, counted against capacity
    pub fn total_on_hand(&self) -> Decimal {
        self.levels.values().copied().sum()
    }

    /// Remaining-stock weighted average acquisition cost of a product,
    /// rounded to 2 decimal places. Zero when no lot stock remains.
    pub fn weighted_average_cost(&self, product_id: Uuid) -> Decimal {
        let mut quantity = Decimal::ZERO;
        let mut value = Decimal::ZERO;
        for lot in self.lots.iter().filter(|l| l.product_id == product_id) {
            quantity += lot.remaining_quantity;
            value += lot.remaining_quantity * lot.unit_cost;
        }
        if quantity.is_zero() {
            Decimal::ZERO
        } else {
            (value / quantity).round_dp(2)
        }
    }

    /// Books incoming purchase order lines as new lots.
    ///
    /// The capacity guard runs over the whole receipt before any lot is
    /// created, so a rejected receipt changes nothing.
    pub fn receive(
        &mut self,
        purchase_order_lines: &[IncomingLine],
        received_at: DateTime<Utc>,
    ) -> Result<Vec<Lot>, StockError> {
        let incoming: Decimal = purchase_order_lines.iter().map(|l| l.quantity).sum();
        let current = self.total_on_hand();
        if current + incoming > self.capacity {
            return Err(StockError::CapacityExceeded {
                capacity: self.capacity,
                current,
                requested: incoming,
            });
        }

        let mut created = Vec::with_capacity(purchase_order_lines.len());
        for line in purchase_order_lines {
            self.next_sequence += 1;
            let lot = Lot {
                id: Uuid::new_v4(),
                product_id: line.product_id,
                warehouse_id: self.warehouse_id,
                purchase_order_line_id: line.line_id,
                received_at,
                sequence: self.next_sequence,
                original_quantity: line.quantity,
                unit_cost: line.unit_cost,
                remaining_quantity: line.quantity,
            };
            self.lots.push(lot.clone());
            *self.levels.entry(line.product_id).or_insert(Decimal::ZERO) += line.quantity;
            created.push(lot);
        }
        Ok(created)
    }

    /// Drains every demand from the lot pool, oldest lots first.
    ///
    /// Runs against a shadow copy of the pool and only swaps it in when
    /// every line could be covered, so a failed shipment leaves lots
    /// and levels exactly as they were.
    pub fn consume_all(
        &mut self,
        demands: &[LineDemand],
    ) -> Result<Vec<Consumption>, StockError> {
        let mut shadow = self.lots.clone();
        let consumptions = drain(&mut shadow, demands)?;

        self.lots = shadow;
        for consumption in &consumptions {
            if let Some(level) = self.levels.get_mut(&consumption.product_id) {
                *level -= consumption.quantity;
            }
        }
        Ok(consumptions)
    }

    /// Books returned goods back into the warehouse.
    ///
    /// The capacity guard runs over the whole return before any bucket
    /// is touched, so a rejected return changes nothing. Returned units
    /// raise the level and the returned bucket but never rejoin the lot
    /// pool, so they can no longer be sold or costed.
    pub fn return_all(&mut self, returns: &[ReturnedLine]) -> Result<(), StockError> {
        let incoming: Decimal = returns.iter().map(|l| l.quantity).sum();
        let current = self.total_on_hand();
        if current + incoming > self.capacity {
            return Err(StockError::CapacityExceeded {
                capacity: self.capacity,
                current,
                requested: incoming,
            });
        }

        for line in returns {
            *self.levels.entry(line.product_id).or_insert(Decimal::ZERO) += line.quantity;
            *self.returned.entry(line.product_id).or_insert(Decimal::ZERO) += line.quantity;
        }
        Ok(())
    }
}
