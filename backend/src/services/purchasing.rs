//! Purchasing service for inbound orders
//!
//! Drives the purchase order state machines and books received goods
//! into the warehouse ledger as costed lots.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::ledger::{Ledger, WarehouseStock};
use shared::models::{
    CreatePurchaseOrderInput, PurchaseOrder, PurchaseOrderLine, PurchasePaymentStatus,
    ReceiptStatus, StateError,
};
use shared::validation::{validate_quantity, validate_unit_price};

/// Purchasing service
#[derive(Clone)]
pub struct PurchasingService {
    ledger: Arc<Ledger>,
}

impl PurchasingService {
    /// Create a new PurchasingService instance
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Create a purchase order in its initial state
    pub async fn create_order(
        &self,
        actor: Uuid,
        input: CreatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        if input.lines.is_empty() {
            return Err(AppError::Validation {
                field: "lines".to_string(),
                message: "Order must have at least one line".to_string(),
                message_th: "คำสั่งซื้อต้องมีอย่างน้อย 1 รายการ".to_string(),
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
            if let Err(message) = validate_unit_price(line.unit_cost) {
                return Err(AppError::Validation {
                    field: "unit_cost".to_string(),
                    message: message.to_string(),
                    message_th: "ต้นทุนต่อหน่วยต้องเป็นค่าบวก".to_string(),
                });
            }
        }

        if self.ledger.get_supplier(input.supplier_id).await.is_none() {
            return Err(AppError::NotFound("Supplier".to_string()));
        }
        if self.ledger.get_warehouse(input.warehouse_id).await.is_none() {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }
        for line in &input.lines {
            if self.ledger.get_product(line.product_id).await.is_none() {
                return Err(AppError::NotFound("Product".to_string()));
            }
        }

        let order = PurchaseOrder {
            id: Uuid::new_v4(),
            order_number: self.ledger.next_purchase_order_number(),
            supplier_id: input.supplier_id,
            warehouse_id: input.warehouse_id,
            lines: input
                .lines
                .iter()
                .map(|line| PurchaseOrderLine {
                    id: Uuid::new_v4(),
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_cost: line.unit_cost,
                })
                .collect(),
            payment_status: PurchasePaymentStatus::Unpaid,
            receipt_status: ReceiptStatus::NotReceived,
            created_by: actor,
            created_at: Utc::now(),
            paid_by: None,
            paid_at: None,
            received_by: None,
            received_at: None,
        };
        self.ledger.insert_purchase_order(order.clone()).await;

        Ok(order)
    }

    /// Record payment for a purchase order
    pub async fn confirm_payment(&self, order_id: Uuid, actor: Uuid) -> AppResult<PurchaseOrder> {
        let now = Utc::now();
        self.ledger
            .update_purchase_order(order_id, |order| {
                order.mark_paid(actor, now)?;
                Ok(order.clone())
            })
            .await
    }

    /// Receive a paid purchase order into its warehouse.
    ///
    /// Runs under the warehouse partition lock. The capacity guard and
    /// the state checks both run before anything mutates, so a rejected
    /// receipt leaves the order and the stock exactly as they were.
    pub async fn receive(&self, order_id: Uuid, actor: Uuid) -> AppResult<PurchaseOrder> {
        let order = self
            .ledger
            .get_purchase_order(order_id)
            .await
            .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        // Partition lock first, order map second
        let mut stock = self.ledger.lock_stock(order.warehouse_id).await?;
        let now = Utc::now();

        self.ledger
            .update_purchase_order(order_id, |order| {
                if order.payment_status == PurchasePaymentStatus::Unpaid {
                    return Err(StateError::NotYetPaid.into());
                }
                if order.receipt_status == ReceiptStatus::Completed {
                    return Err(StateError::AlreadyReceived.into());
                }

                Self::book_receipt(&mut stock, order, now)?;

                // State checks already passed, this cannot fail
                order.complete_receipt(actor, now)?;
                Ok(order.clone())
            })
            .await
    }

    fn book_receipt(
        stock: &mut WarehouseStock,
        order: &PurchaseOrder,
        now: chrono::DateTime<Utc>,
    ) -> AppResult<()> {
        let incoming: Vec<_> = order
            .lines
            .iter()
            .map(|line| crate::ledger::IncomingLine {
                line_id: line.id,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_cost: line.unit_cost,
            })
            .collect();
        stock.receive(&incoming, now)?;
        Ok(())
    }

    /// List purchase orders that are paid but not yet received
    pub async fn pending_receipts(&self) -> AppResult<Vec<PurchaseOrder>> {
        Ok(self
            .ledger
            .list_purchase_orders()
            .await
            .into_iter()
            .filter(|order| order.receipt_status == ReceiptStatus::PendingReceipt)
            .collect())
    }

    /// List all purchase orders
    pub async fn list_orders(&self) -> AppResult<Vec<PurchaseOrder>> {
        Ok(self.ledger.list_purchase_orders().await)
    }

    /// Get a purchase order by id
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<PurchaseOrder> {
        self.ledger
            .get_purchase_order(order_id)
            .await
            .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{CreatePurchaseOrderLineInput, Product, Supplier, Warehouse};
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    struct Fixture {
        service: PurchasingService,
        ledger: Arc<Ledger>,
        actor: Uuid,
        supplier_id: Uuid,
        warehouse_id: Uuid,
        product_id: Uuid,
    }

    async fn fixture(capacity: &str) -> Fixture {
        let ledger = Arc::new(Ledger::new(Duration::from_millis(200)));
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: "สหกรณ์กาแฟดอยช้าง".to_string(),
            contact_person: "สมชาย ใจดี".to_string(),
            phone: "0812345678".to_string(),
            address: "เชียงราย".to_string(),
            created_at: Utc::now(),
        };
        let warehouse = Warehouse {
            id: Uuid::new_v4(),
            name: "คลังหลัก".to_string(),
            location: "Chiang Mai".to_string(),
            capacity: dec(capacity),
            created_at: Utc::now(),
        };
        let product = Product {
            id: Uuid::new_v4(),
            name: "Arabica Green Beans".to_string(),
            unit: "kg".to_string(),
            reference_price: dec("150"),
            created_at: Utc::now(),
        };

        let fx = Fixture {
            service: PurchasingService::new(ledger.clone()),
            ledger: ledger.clone(),
            actor: Uuid::new_v4(),
            supplier_id: supplier.id,
            warehouse_id: warehouse.id,
            product_id: product.id,
        };
        ledger.insert_supplier(supplier).await;
        ledger.register_warehouse(warehouse).await;
        ledger.insert_product(product).await;
        fx
    }

    fn order_input(fx: &Fixture, lines: &[(&str, &str)]) -> CreatePurchaseOrderInput {
        CreatePurchaseOrderInput {
            supplier_id: fx.supplier_id,
            warehouse_id: fx.warehouse_id,
            lines: lines
                .iter()
                .map(|(quantity, unit_cost)| CreatePurchaseOrderLineInput {
                    product_id: fx.product_id,
                    quantity: dec(quantity),
                    unit_cost: dec(unit_cost),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_order_starts_unpaid_and_unreceived() {
        let fx = fixture("100").await;

        let order = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("10", "1.00"), ("10", "2.00")]))
            .await
            .unwrap();

        assert_eq!(order.order_number, "PO001");
        assert_eq!(order.payment_status, PurchasePaymentStatus::Unpaid);
        assert_eq!(order.receipt_status, ReceiptStatus::NotReceived);
        assert_eq!(order.total_cost(), dec("30.00"));
    }

    #[tokio::test]
    async fn test_create_order_rejects_empty_lines() {
        let fx = fixture("100").await;

        let err = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_order_rejects_non_positive_quantity() {
        let fx = fixture("100").await;

        let err = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("0", "1.00")]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_receive_requires_payment_first() {
        let fx = fixture("100").await;
        let order = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("10", "1.00")]))
            .await
            .unwrap();

        let err = fx.service.receive(order.id, fx.actor).await.unwrap_err();

        assert!(matches!(err, AppError::State(StateError::NotYetPaid)));
        let stock = fx.ledger.lock_stock(fx.warehouse_id).await.unwrap();
        assert_eq!(stock.total_on_hand(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_pay_then_receive_books_fifo_lots() {
        let fx = fixture("100").await;
        let order = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("10", "1.00"), ("10", "2.00")]))
            .await
            .unwrap();

        let paid = fx.service.confirm_payment(order.id, fx.actor).await.unwrap();
        assert_eq!(paid.payment_status, PurchasePaymentStatus::Paid);
        assert_eq!(paid.receipt_status, ReceiptStatus::PendingReceipt);
        assert!(paid.paid_at.is_some());
        assert_eq!(fx.service.pending_receipts().await.unwrap().len(), 1);

        let received = fx.service.receive(order.id, fx.actor).await.unwrap();
        assert_eq!(received.receipt_status, ReceiptStatus::Completed);
        assert_eq!(received.received_by, Some(fx.actor));
        assert!(fx.service.pending_receipts().await.unwrap().is_empty());

        let stock = fx.ledger.lock_stock(fx.warehouse_id).await.unwrap();
        assert_eq!(stock.level(fx.product_id), dec("20"));
        assert_eq!(stock.lots().len(), 2);
        assert_eq!(stock.weighted_average_cost(fx.product_id), dec("1.50"));
    }

    #[tokio::test]
    async fn test_receive_twice_is_rejected() {
        let fx = fixture("100").await;
        let order = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("10", "1.00")]))
            .await
            .unwrap();
        fx.service.confirm_payment(order.id, fx.actor).await.unwrap();
        fx.service.receive(order.id, fx.actor).await.unwrap();

        let err = fx.service.receive(order.id, fx.actor).await.unwrap_err();

        assert!(matches!(err, AppError::State(StateError::AlreadyReceived)));
        let stock = fx.ledger.lock_stock(fx.warehouse_id).await.unwrap();
        assert_eq!(stock.level(fx.product_id), dec("10"));
        assert_eq!(stock.lots().len(), 1);
    }

    #[tokio::test]
    async fn test_receipt_over_capacity_is_rejected_as_a_whole() {
        let fx = fixture("15").await;
        let order = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("12", "1.00"), ("8", "1.00")]))
            .await
            .unwrap();
        fx.service.confirm_payment(order.id, fx.actor).await.unwrap();

        let err = fx.service.receive(order.id, fx.actor).await.unwrap_err();

        assert!(matches!(err, AppError::CapacityExceeded { .. }));
        // the order stays receivable and the warehouse stays empty
        let order = fx.service.get_order(order.id).await.unwrap();
        assert_eq!(order.receipt_status, ReceiptStatus::PendingReceipt);
        let stock = fx.ledger.lock_stock(fx.warehouse_id).await.unwrap();
        assert_eq!(stock.total_on_hand(), Decimal::ZERO);
        assert!(stock.lots().is_empty());
    }

    #[tokio::test]
    async fn test_receipt_fills_the_warehouse_to_the_brim() {
        let fx = fixture("100").await;

        let first = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("90", "1.00")]))
            .await
            .unwrap();
        fx.service.confirm_payment(first.id, fx.actor).await.unwrap();
        fx.service.receive(first.id, fx.actor).await.unwrap();

        let second = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("20", "1.00")]))
            .await
            .unwrap();
        fx.service
            .confirm_payment(second.id, fx.actor)
            .await
            .unwrap();
        let err = fx.service.receive(second.id, fx.actor).await.unwrap_err();
        match err {
            AppError::CapacityExceeded {
                capacity,
                current,
                requested,
            } => {
                assert_eq!(capacity, dec("100"));
                assert_eq!(current, dec("90"));
                assert_eq!(requested, dec("20"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // an exact fit is allowed
        let third = fx
            .service
            .create_order(fx.actor, order_input(&fx, &[("10", "1.00")]))
            .await
            .unwrap();
        fx.service.confirm_payment(third.id, fx.actor).await.unwrap();
        fx.service.receive(third.id, fx.actor).await.unwrap();

        let stock = fx.ledger.lock_stock(fx.warehouse_id).await.unwrap();
        assert_eq!(stock.total_on_hand(), dec("100"));
    }
}
