//! FIFO lot consumption
//!
//! Draining walks lots oldest first, ordered by receipt time with the
//! per-warehouse sequence number breaking ties. Each demand takes as
//! much as the current lot holds before moving to the next, so a lot
//! is never skipped while it still has stock.

use rust_decimal::Decimal;
use shared::models::Lot;
use uuid::Uuid;

use super::StockError;

/// Quantity of one product demanded by one order line
#[derive(Debug, Clone)]
pub struct LineDemand {
    pub line_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
}

/// Quantity taken from a single lot for a single order line
#[derive(Debug, Clone)]
pub struct Consumption {
    pub line_id: Uuid,
    pub lot_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

impl Consumption {
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// Drains `demands` from `lots` oldest first, mutating lot remainders
/// in place and reporting what was taken from where.
///
/// Demands are satisfied in order, so two demands for the same product
/// compete for the same lots and the earlier one wins the older stock.
/// On `StockError::Exhausted` the lots are left partially drained;
/// callers needing all-or-nothing behavior drain a copy and swap it in
/// on success.
pub fn drain(lots: &mut Vec<Lot>, demands: &[LineDemand]) -> Result<Vec<Consumption>, StockError> {
    lots.sort_by_key(|lot| (lot.received_at, lot.sequence));

    let mut consumptions = Vec::new();
    for demand in demands {
        let mut outstanding = demand.quantity;
        for lot in lots
            .iter_mut()
            .filter(|lot| lot.product_id == demand.product_id)
        {
            if outstanding <= Decimal::ZERO {
                break;
            }
            let taken = lot.take(outstanding);
            if taken > Decimal::ZERO {
                outstanding -= taken;
                consumptions.push(Consumption {
                    line_id: demand.line_id,
                    lot_id: lot.id,
                    product_id: demand.product_id,
                    quantity: taken,
                    unit_cost: lot.unit_cost,
                });
            }
        }
        if outstanding > Decimal::ZERO {
            return Err(StockError::Exhausted {
                product_id: demand.product_id,
                requested: demand.quantity,
                available: demand.quantity - outstanding,
            });
        }
    }
    Ok(consumptions)
}
