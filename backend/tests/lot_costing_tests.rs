//! Lot costing tests for the AgriTrade Platform
//!
//! A lot records stock at its acquisition cost, and shipments drain the
//! pool oldest-first. These tests cover the take() arithmetic every
//! drain is built from, and the ordering contract between received_at
//! and the per-warehouse sequence number.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{CostRecord, Lot};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn lot(minutes_ago: i64, sequence: u64, quantity: Decimal, unit_cost: Decimal) -> Lot {
    Lot {
        id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        warehouse_id: Uuid::new_v4(),
        purchase_order_line_id: Uuid::new_v4(),
        received_at: Utc::now() - Duration::minutes(minutes_ago),
        sequence,
        original_quantity: quantity,
        unit_cost,
        remaining_quantity: quantity,
    }
}

/// Drain `demand` from the pool oldest-first, the way shipment does,
/// returning the acquisition cost charged
fn drain_oldest_first(lots: &mut [Lot], mut demand: Decimal) -> Decimal {
    lots.sort_by(|a, b| {
        a.received_at
            .cmp(&b.received_at)
            .then(a.sequence.cmp(&b.sequence))
    });
    let mut charged = Decimal::ZERO;
    for lot in lots.iter_mut() {
        if demand <= Decimal::ZERO {
            break;
        }
        let taken = lot.take(demand);
        charged += taken * lot.unit_cost;
        demand -= taken;
    }
    charged
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// take() never hands out more than the lot holds and never leaves
    /// a negative remainder.
    #[test]
    fn test_take_caps_at_whats_left(
        remaining_satang in 0i64..1_000_000,
        requested_satang in 0i64..2_000_000,
    ) {
        let remaining = Decimal::new(remaining_satang, 2);
        let requested = Decimal::new(requested_satang, 2);
        let mut lot = lot(10, 1, remaining, dec("1.50"));

        let taken = lot.take(requested);

        prop_assert_eq!(taken, requested.min(remaining));
        prop_assert_eq!(lot.remaining_quantity, remaining - taken);
        prop_assert!(lot.remaining_quantity >= Decimal::ZERO);
    }

    /// However a lot is nibbled at, quantity is conserved: what was
    /// taken plus what remains equals what was received.
    #[test]
    fn test_repeated_takes_conserve_quantity(
        original in 1u32..10_000,
        requests in proptest::collection::vec(0u32..5_000, 1..10),
    ) {
        let original = Decimal::from(original);
        let mut lot = lot(10, 1, original, dec("2.00"));

        let mut total_taken = Decimal::ZERO;
        for request in requests {
            total_taken += lot.take(Decimal::from(request));
        }

        prop_assert_eq!(total_taken + lot.remaining_quantity, original);
        prop_assert_eq!(lot.consumed_quantity(), total_taken);
    }

    /// A demand that fits inside the oldest lot never touches newer
    /// stock, and is charged at the oldest lot's cost.
    #[test]
    fn test_oldest_lot_drains_first(
        newer_age in 1i64..1_000,
        age_gap in 1i64..1_000,
        older_quantity in 1u32..5_000,
        newer_quantity in 1u32..5_000,
    ) {
        let older = lot(newer_age + age_gap, 1, Decimal::from(older_quantity), dec("1.00"));
        let newer = lot(newer_age, 2, Decimal::from(newer_quantity), dec("9.00"));
        let newer_id = newer.id;
        let demand = Decimal::from(older_quantity);

        // Pool deliberately listed newest-first
        let mut pool = vec![newer, older];
        let charged = drain_oldest_first(&mut pool, demand);

        prop_assert_eq!(charged, demand * dec("1.00"));
        let newer = pool.iter().find(|l| l.id == newer_id).unwrap();
        prop_assert_eq!(newer.remaining_quantity, newer.original_quantity);
    }

    /// After a drain, the pool in age order is an exhausted prefix, at
    /// most one partially consumed lot, then untouched lots.
    #[test]
    fn test_drain_leaves_at_most_one_partial_lot(
        quantities in proptest::collection::vec(1u32..1_000, 2..6),
        demand_percent in 1u32..100,
    ) {
        let total: u32 = quantities.iter().sum();
        let demand = Decimal::from(total * demand_percent) / Decimal::from(100u32);

        let mut pool: Vec<Lot> = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| lot(1_000 - i as i64, i as u64, Decimal::from(q), dec("3.00")))
            .collect();
        drain_oldest_first(&mut pool, demand);

        let mut partials = 0;
        let mut seen_untouched = false;
        for lot in &pool {
            if lot.remaining_quantity == lot.original_quantity {
                seen_untouched = true;
            } else {
                prop_assert!(!seen_untouched, "a drained lot may not follow an untouched one");
                if !lot.is_exhausted() {
                    partials += 1;
                }
            }
        }
        prop_assert!(partials <= 1);
    }

    /// A cost record charges exactly quantity times the lot's unit cost.
    #[test]
    fn test_cost_record_total(
        quantity in 1u32..10_000,
        cost_satang in 1i64..1_000_000,
    ) {
        let record = CostRecord {
            id: Uuid::new_v4(),
            sales_order_id: Uuid::new_v4(),
            sales_order_line_id: Uuid::new_v4(),
            lot_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity: Decimal::from(quantity),
            unit_cost: Decimal::new(cost_satang, 2),
            recorded_at: Utc::now(),
        };

        prop_assert_eq!(
            record.cost_total(),
            Decimal::from(quantity) * Decimal::new(cost_satang, 2)
        );
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_sequence_breaks_same_instant_ties() {
    let received_at = Utc::now();
    let mut first = lot(0, 1, dec("10"), dec("1.00"));
    let mut second = lot(0, 2, dec("10"), dec("2.00"));
    first.received_at = received_at;
    second.received_at = received_at;
    let second_id = second.id;

    let mut pool = vec![second, first];
    let charged = drain_oldest_first(&mut pool, dec("10"));

    // Sequence 1 drains before sequence 2
    assert_eq!(charged, dec("10.00"));
    let second = pool.iter().find(|l| l.id == second_id).unwrap();
    assert_eq!(second.remaining_quantity, dec("10"));
}

#[test]
fn test_drain_charges_acquisition_cost_across_lots() {
    let mut pool = vec![
        lot(120, 1, dec("10"), dec("1.00")),
        lot(60, 2, dec("10"), dec("2.00")),
    ];

    let charged = drain_oldest_first(&mut pool, dec("15"));

    // 10 units at 1.00 plus 5 units at 2.00
    assert_eq!(charged, dec("20.00"));
}

#[test]
fn test_exhausted_lot_stays_in_the_pool() {
    let mut lot = lot(10, 1, dec("5"), dec("4.00"));

    assert_eq!(lot.take(dec("5")), dec("5"));
    assert!(lot.is_exhausted());
    assert_eq!(lot.original_quantity, dec("5"));
    assert_eq!(lot.consumed_quantity(), dec("5"));
    // A further take yields nothing
    assert_eq!(lot.take(dec("1")), Decimal::ZERO);
}
