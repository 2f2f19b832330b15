//! Sales service for outbound orders
//!
//! Shipment is the costing moment: the order's lines are drained from
//! the warehouse lot pool oldest first, and every lot touched yields a
//! cost record carrying that lot's acquisition cost. Returns bring
//! goods back into the warehouse as a non-sellable bucket, gated by
//! the same capacity guard as receipts.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::ledger::{Ledger, LineDemand, ReturnedLine, StockError};
use shared::models::{
    CostRecord, CreateSalesOrderInput, ReturnEvent, SalesOrder, SalesOrderLine,
    SalesPaymentStatus, ShipmentStatus, StateError,
};
use shared::validation::{validate_quantity, validate_unit_price};

/// Sales service
#[derive(Clone)]
pub struct SalesService {
    ledger: Arc<Ledger>,
}

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Create a sales order in its initial state.
    ///
    /// Availability is checked against sellable stock per product, with
    /// lines for the same product counted together. Nothing is reserved;
    /// shipment re-checks against the lots it actually drains.
    pub async fn create_order(
        &self,
        actor: Uuid,
        input: CreateSalesOrderInput,
    ) -> AppResult<SalesOrder> {
        if input.lines.is_empty() {
            return Err(AppError::Validation {
                field: "lines".to_string(),
                message: "Order must have at least one line".to_string(),
                message_th: "คำสั่งขายต้องมีอย่างน้อย 1 รายการ".to_string(),
            });
        }

        for line in &input.lines {
            if let Err(message) = validate_quantity(line.quantity) {
                return Err(AppError::Validation {
                    field: "quantity".to_string(),
                    message: message.to_string(),
                    message_th: "ปริมาณต้องเป็นค่าบวก".to_string(),
                });
            }
            if let Err(message) = validate_unit_price(line.unit_price) {
                return Err(AppError::Validation {
                    field: "unit_price".to_string(),
                    message: message.to_string(),
                    message_th: "ราคาต่อหน่วยต้องเป็นค่าบวก".to_string(),
                });
            }
        }

        if self.ledger.get_customer(input.customer_id).await.is_none() {
            return Err(AppError::NotFound("Customer".to_string()));
        }
        if self.ledger.get_warehouse(input.warehouse_id).await.is_none() {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        let mut names = HashMap::new();
        for line in &input.lines {
            match self.ledger.get_product(line.product_id).await {
                Some(product) => {
                    names.insert(line.product_id, product.name);
                }
                None => return Err(AppError::NotFound("Product".to_string())),
            }
        }

        // Demand per product across lines
        let mut demanded: HashMap<Uuid, Decimal> = HashMap::new();
        for line in &input.lines {
            *demanded.entry(line.product_id).or_insert(Decimal::ZERO) += line.quantity;
        }

        let stock = self.ledger.lock_stock(input.warehouse_id).await?;
        for (product_id, quantity) in &demanded {
            let available = stock.sellable(*product_id);
            if available < *quantity {
                return Err(AppError::InsufficientStock {
                    product: names
                        .get(product_id)
                        .cloned()
                        .unwrap_or_else(|| product_id.to_string()),
                    requested: *quantity,
                    available,
                });
            }
        }

        let order = SalesOrder {
            id: Uuid::new_v4(),
            order_number: self.ledger.next_sales_order_number(),
            customer_id: input.customer_id,
            warehouse_id: input.warehouse_id,
            lines: input
                .lines
                .iter()
                .map(|line| SalesOrderLine {
                    id: Uuid::new_v4(),
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            shipment_status: ShipmentStatus::Pending,
            payment_status: SalesPaymentStatus::Unpaid,
            created_by: actor,
            created_at: Utc::now(),
            shipped_by: None,
            shipped_at: None,
            delivered_by: None,
            delivered_at: None,
            return_requested_by: None,
            return_requested_at: None,
            returned_by: None,
            returned_at: None,
            paid_by: None,
            paid_at: None,
        };
        self.ledger.insert_sales_order(order.clone()).await;
        drop(stock);

        Ok(order)
    }

    /// Ship a pending sales order, draining its lines from the
    /// warehouse lot pool and recording the cost of goods sold.
    ///
    /// The drain is all-or-nothing: when any line cannot be covered the
    /// order stays pending and no lot loses a single unit.
    pub async fn ship(&self, order_id: Uuid, actor: Uuid) -> AppResult<SalesOrder> {
        let order = self
            .ledger
            .get_sales_order(order_id)
            .await
            .ok_or_else(|| AppError::NotFound("Sales order".to_string()))?;

        let names = self
            .ledger
            .product_names(order.lines.iter().map(|line| line.product_id))
            .await;

        // Partition lock first, order map second
        let mut stock = self.ledger.lock_stock(order.warehouse_id).await?;
        let now = Utc::now();

        let (shipped, consumptions) = self
            .ledger
            .update_sales_order(order_id, |order| {
                if order.shipment_status != ShipmentStatus::Pending {
                    return Err(StateError::NotPending.into());
                }

                let demands: Vec<_> = order
                    .lines
                    .iter()
                    .map(|line| LineDemand {
                        line_id: line.id,
                        product_id: line.product_id,
                        quantity: line.quantity,
                    })
                    .collect();

                let consumptions = stock
                    .consume_all(&demands)
                    .map_err(|err| exhausted_with_names(err, &names))?;

                // State check already passed, this cannot fail
                order.mark_shipped(actor, now)?;
                Ok((order.clone(), consumptions))
            })
            .await?;

        let records: Vec<_> = consumptions
            .iter()
            .map(|consumption| CostRecord {
                id: Uuid::new_v4(),
                sales_order_id: shipped.id,
                sales_order_line_id: consumption.line_id,
                lot_id: consumption.lot_id,
                product_id: consumption.product_id,
                quantity: consumption.quantity,
                unit_cost: consumption.unit_cost,
                recorded_at: now,
            })
            .collect();
        self.ledger.append_cost_records(records).await;

        Ok(shipped)
    }

    /// Confirm that a shipped order reached the customer
    pub async fn confirm_delivery(&self, order_id: Uuid, actor: Uuid) -> AppResult<SalesOrder> {
        let now = Utc::now();
        self.ledger
            .update_sales_order(order_id, |order| {
                order.confirm_delivery(actor, now)?;
                Ok(order.clone())
            })
            .await
    }

    /// Record a customer's return request for a delivered order
    pub async fn request_return(&self, order_id: Uuid, actor: Uuid) -> AppResult<SalesOrder> {
        let now = Utc::now();
        self.ledger
            .update_sales_order(order_id, |order| {
                order.request_return(actor, now)?;
                Ok(order.clone())
            })
            .await
    }

    /// Receive returned goods back into the warehouse.
    ///
    /// The full order quantity comes back as a returned bucket per
    /// product, and the whole return must fit under the warehouse
    /// capacity or nothing is booked. Returned units count toward the
    /// warehouse level but never rejoin the lot pool, so each booked
    /// line is recorded as a return event with no cost basis.
    pub async fn confirm_return(&self, order_id: Uuid, actor: Uuid) -> AppResult<SalesOrder> {
        let order = self
            .ledger
            .get_sales_order(order_id)
            .await
            .ok_or_else(|| AppError::NotFound("Sales order".to_string()))?;

        // Partition lock first, order map second
        let mut stock = self.ledger.lock_stock(order.warehouse_id).await?;
        let now = Utc::now();

        let returned = self
            .ledger
            .update_sales_order(order_id, |order| {
                if order.shipment_status != ShipmentStatus::ReturnRequested {
                    return Err(StateError::NoReturnRequested.into());
                }

                let returns: Vec<ReturnedLine> = order
                    .lines
                    .iter()
                    .map(|line| ReturnedLine {
                        product_id: line.product_id,
                        quantity: line.quantity,
                    })
                    .collect();
                stock.return_all(&returns)?;

                // Stock is booked and the state check already passed,
                // so this cannot fail
                order.confirm_return(actor, now)?;
                Ok(order.clone())
            })
            .await?;

        let events: Vec<ReturnEvent> = returned
            .lines
            .iter()
            .map(|line| ReturnEvent {
                id: Uuid::new_v4(),
                sales_order_id: returned.id,
                sales_order_line_id: line.id,
                product_id: line.product_id,
                warehouse_id: returned.warehouse_id,
                quantity: line.quantity,
                returned_at: now,
            })
            .collect();
        self.ledger.append_return_events(events).await;

        Ok(returned)
    }

    /// Record payment for a sales order
    pub async fn confirm_payment(&self, order_id: Uuid, actor: Uuid) -> AppResult<SalesOrder> {
        let now = Utc::now();
        self.ledger
            .update_sales_order(order_id, |order| {
                order.confirm_payment(actor, now)?;
                Ok(order.clone())
            })
            .await
    }

    /// List all sales orders
    pub async fn list_orders(&self) -> AppResult<Vec<SalesOrder>> {
        Ok(self.ledger.list_sales_orders().await)
    }

    /// Get a sales order by id
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<SalesOrder> {
        self.ledger
            .get_sales_order(order_id)
            .await
            .ok_or_else(|| AppError::NotFound("Sales order".to_string()))
    }

    /// Cost records booked for one sales order
    pub async fn cost_records(&self, order_id: Uuid) -> AppResult<Vec<CostRecord>> {
        if self.ledger.get_sales_order(order_id).await.is_none() {
            return Err(AppError::NotFound("Sales order".to_string()));
        }
        Ok(self.ledger.cost_records_for_order(order_id).await)
    }

    /// Return events booked for one sales order
    pub async fn return_events(&self, order_id: Uuid) -> AppResult<Vec<ReturnEvent>> {
        if self.ledger.get_sales_order(order_id).await.is_none() {
            return Err(AppError::NotFound("Sales order".to_string()));
        }
        Ok(self.ledger.return_events_for_order(order_id).await)
    }
}

fn exhausted_with_names(err: StockError, names: &HashMap<Uuid, String>) -> AppError {
    match err {
        StockError::Exhausted { product_id, requested, available } => AppError::StockExhausted {
            product: names
                .get(&product_id)
                .cloned()
                .unwrap_or_else(|| product_id.to_string()),
            requested,
            available,
        },
        other => other.into(),
    }
}
