//! Purchase order models and state transitions
//!
//! A purchase order moves through two coupled machines: payment
//! (unpaid -> paid) and receipt (not received -> pending receipt ->
//! completed). Stock only enters a warehouse when the receipt machine
//! reaches `Completed`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Rejected order-state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("order is already paid")]
    AlreadyPaid,
    #[error("order has not been paid yet")]
    NotYetPaid,
    #[error("order has already been received")]
    AlreadyReceived,
    #[error("order is not pending shipment")]
    NotPending,
    #[error("order has not been shipped")]
    NotShipped,
    #[error("order has not been delivered")]
    NotDelivered,
    #[error("no return has been requested for this order")]
    NoReturnRequested,
}

/// Payment state of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchasePaymentStatus {
    Unpaid,
    Paid,
}

impl std::fmt::Display for PurchasePaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchasePaymentStatus::Unpaid => write!(f, "Unpaid"),
            PurchasePaymentStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// Receipt state of a purchase order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    NotReceived,
    PendingReceipt,
    Completed,
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiptStatus::NotReceived => write!(f, "Not Received"),
            ReceiptStatus::PendingReceipt => write!(f, "Pending Receipt"),
            ReceiptStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// One product line on a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    /// Acquisition cost per unit; becomes the lot cost at receipt
    pub unit_cost: Decimal,
}

impl PurchaseOrderLine {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// An inbound order placed with a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    /// Human-facing running number (e.g., "PO001")
    pub order_number: String,
    pub supplier_id: Uuid,
    /// Destination warehouse for every line on this order
    pub warehouse_id: Uuid,
    pub lines: Vec<PurchaseOrderLine>,
    pub payment_status: PurchasePaymentStatus,
    pub receipt_status: ReceiptStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub paid_by: Option<Uuid>,
    pub paid_at: Option<DateTime<Utc>>,
    pub received_by: Option<Uuid>,
    pub received_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    pub fn total_cost(&self) -> Decimal {
        self.lines.iter().map(|line| line.line_total()).sum()
    }

    /// Records payment. The order becomes eligible for receipt.
    pub fn mark_paid(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), StateError> {
        if self.payment_status == PurchasePaymentStatus::Paid {
            return Err(StateError::AlreadyPaid);
        }
        self.payment_status = PurchasePaymentStatus::Paid;
        self.receipt_status = ReceiptStatus::PendingReceipt;
        self.paid_by = Some(actor);
        self.paid_at = Some(now);
        Ok(())
    }

    /// Records goods receipt. Only valid once, and only after payment.
    pub fn complete_receipt(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), StateError> {
        if self.payment_status == PurchasePaymentStatus::Unpaid {
            return Err(StateError::NotYetPaid);
        }
        if self.receipt_status == ReceiptStatus::Completed {
            return Err(StateError::AlreadyReceived);
        }
        self.receipt_status = ReceiptStatus::Completed;
        self.received_by = Some(actor);
        self.received_at = Some(now);
        Ok(())
    }
}

/// One line of a purchase order being created
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePurchaseOrderLineInput {
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

/// Input for creating a purchase order. Line quantities and costs are
/// checked by the purchasing service, which owns the error wording.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderInput {
    pub supplier_id: Uuid,
    pub warehouse_id: Uuid,
    pub lines: Vec<CreatePurchaseOrderLineInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_order() -> PurchaseOrder {
        PurchaseOrder {
            id: Uuid::new_v4(),
            order_number: "PO001".to_string(),
            supplier_id: Uuid::new_v4(),
            warehouse_id: Uuid::new_v4(),
            lines: vec![
                PurchaseOrderLine {
                    id: Uuid::new_v4(),
                    product_id: Uuid::new_v4(),
                    quantity: dec("10"),
                    unit_cost: dec("1.00"),
                },
                PurchaseOrderLine {
                    id: Uuid::new_v4(),
                    product_id: Uuid::new_v4(),
                    quantity: dec("5"),
                    unit_cost: dec("2.50"),
                },
            ],
            payment_status: PurchasePaymentStatus::Unpaid,
            receipt_status: ReceiptStatus::NotReceived,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            paid_by: None,
            paid_at: None,
            received_by: None,
            received_at: None,
        }
    }

    #[test]
    fn test_total_cost_sums_lines() {
        let order = sample_order();
        assert_eq!(order.total_cost(), dec("22.50"));
    }

    #[test]
    fn test_pay_then_receive_happy_path() {
        let mut order = sample_order();
        let payer = Uuid::new_v4();
        let receiver = Uuid::new_v4();
        let now = Utc::now();

        order.mark_paid(payer, now).unwrap();
        assert_eq!(order.payment_status, PurchasePaymentStatus::Paid);
        assert_eq!(order.receipt_status, ReceiptStatus::PendingReceipt);
        assert_eq!(order.paid_by, Some(payer));
        assert_eq!(order.paid_at, Some(now));

        order.complete_receipt(receiver, now).unwrap();
        assert_eq!(order.receipt_status, ReceiptStatus::Completed);
        assert_eq!(order.received_by, Some(receiver));
        assert_eq!(order.received_at, Some(now));
    }

    #[test]
    fn test_paying_twice_is_rejected() {
        let mut order = sample_order();
        order.mark_paid(Uuid::new_v4(), Utc::now()).unwrap();
        let err = order.mark_paid(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert_eq!(err, StateError::AlreadyPaid);
        // First payment stamps survive the rejected retry
        assert!(order.paid_by.is_some());
    }

    #[test]
    fn test_receiving_before_payment_is_rejected() {
        let mut order = sample_order();
        let err = order
            .complete_receipt(Uuid::new_v4(), Utc::now())
            .unwrap_err();
        assert_eq!(err, StateError::NotYetPaid);
        assert_eq!(order.receipt_status, ReceiptStatus::NotReceived);
    }

    #[test]
    fn test_receiving_twice_is_rejected() {
        let mut order = sample_order();
        order.mark_paid(Uuid::new_v4(), Utc::now()).unwrap();
        order.complete_receipt(Uuid::new_v4(), Utc::now()).unwrap();
        let err = order
            .complete_receipt(Uuid::new_v4(), Utc::now())
            .unwrap_err();
        assert_eq!(err, StateError::AlreadyReceived);
    }
}
