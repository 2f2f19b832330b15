//! Sales order models and state transitions
//!
//! The shipment machine is the single source of truth for fulfilment:
//! pending -> shipped -> delivered -> return requested -> returned.
//! Delivery and return confirmations are recorded as audit stamps on
//! the order rather than as a parallel status column. Payment is a
//! separate two-state machine that only opens once the customer has
//! confirmed delivery.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::purchase_order::StateError;

/// Fulfilment state of a sales order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Shipped,
    Delivered,
    ReturnRequested,
    Returned,
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipmentStatus::Pending => write!(f, "Pending"),
            ShipmentStatus::Shipped => write!(f, "Shipped"),
            ShipmentStatus::Delivered => write!(f, "Delivered"),
            ShipmentStatus::ReturnRequested => write!(f, "Return Requested"),
            ShipmentStatus::Returned => write!(f, "Returned"),
        }
    }
}

/// Payment state of a sales order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalesPaymentStatus {
    Unpaid,
    Paid,
}

impl std::fmt::Display for SalesPaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalesPaymentStatus::Unpaid => write!(f, "Unpaid"),
            SalesPaymentStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// One product line on a sales order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    /// Sale price per unit, fixed at order creation
    pub unit_price: Decimal,
}

impl SalesOrderLine {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// An outbound order placed by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: Uuid,
    /// Human-facing running number (e.g., "SO001")
    pub order_number: String,
    pub customer_id: Uuid,
    /// Warehouse every line on this order ships from
    pub warehouse_id: Uuid,
    pub lines: Vec<SalesOrderLine>,
    pub shipment_status: ShipmentStatus,
    pub payment_status: SalesPaymentStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub shipped_by: Option<Uuid>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_by: Option<Uuid>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub return_requested_by: Option<Uuid>,
    pub return_requested_at: Option<DateTime<Utc>>,
    pub returned_by: Option<Uuid>,
    pub returned_at: Option<DateTime<Utc>>,
    pub paid_by: Option<Uuid>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl SalesOrder {
    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().map(|line| line.line_total()).sum()
    }

    pub fn total_quantity(&self) -> Decimal {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Marks the order shipped. Stock must already have been drained by
    /// the caller; this only advances the machine.
    pub fn mark_shipped(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), StateError> {
        if self.shipment_status != ShipmentStatus::Pending {
            return Err(StateError::NotPending);
        }
        self.shipment_status = ShipmentStatus::Shipped;
        self.shipped_by = Some(actor);
        self.shipped_at = Some(now);
        Ok(())
    }

    pub fn confirm_delivery(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), StateError> {
        if self.shipment_status != ShipmentStatus::Shipped {
            return Err(StateError::NotShipped);
        }
        self.shipment_status = ShipmentStatus::Delivered;
        self.delivered_by = Some(actor);
        self.delivered_at = Some(now);
        Ok(())
    }

    pub fn request_return(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), StateError> {
        if self.shipment_status != ShipmentStatus::Delivered {
            return Err(StateError::NotDelivered);
        }
        self.shipment_status = ShipmentStatus::ReturnRequested;
        self.return_requested_by = Some(actor);
        self.return_requested_at = Some(now);
        Ok(())
    }

    /// Marks the return received. Stock re-entry is the caller's job;
    /// this only advances the machine.
    pub fn confirm_return(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), StateError> {
        if self.shipment_status != ShipmentStatus::ReturnRequested {
            return Err(StateError::NoReturnRequested);
        }
        self.shipment_status = ShipmentStatus::Returned;
        self.returned_by = Some(actor);
        self.returned_at = Some(now);
        Ok(())
    }

    /// Records payment. Only legal once delivery has been confirmed;
    /// the delivery stamp survives a later return, so returned orders
    /// stay payable.
    pub fn confirm_payment(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), StateError> {
        if self.delivered_at.is_none() {
            return Err(StateError::NotDelivered);
        }
        if self.payment_status == SalesPaymentStatus::Paid {
            return Err(StateError::AlreadyPaid);
        }
        self.payment_status = SalesPaymentStatus::Paid;
        self.paid_by = Some(actor);
        self.paid_at = Some(now);
        Ok(())
    }
}

/// Cost of goods taken from one lot for one sales order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecord {
    pub id: Uuid,
    pub sales_order_id: Uuid,
    pub sales_order_line_id: Uuid,
    pub lot_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    /// Unit cost carried over from the consumed lot
    pub unit_cost: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl CostRecord {
    pub fn cost_total(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// Quantity from one sales order line re-admitted by a confirmed return.
/// Returned units are tracked outside the lot pool and carry no cost
/// basis, so an event never feeds back into FIFO costing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnEvent {
    pub id: Uuid,
    pub sales_order_id: Uuid,
    pub sales_order_line_id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub returned_at: DateTime<Utc>,
}

/// One line of a sales order being created
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSalesOrderLineInput {
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Input for creating a sales order. Line quantities and prices are
/// checked by the sales service, which owns the error wording.
#[derive(Debug, Deserialize)]
pub struct CreateSalesOrderInput {
    pub customer_id: Uuid,
    pub warehouse_id: Uuid,
    pub lines: Vec<CreateSalesOrderLineInput>,
}
