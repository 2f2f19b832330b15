//! Reporting service for profit figures and the operations dashboard
//!
//! Revenue is recognized on delivery: an order enters the profit and
//! loss report when its delivery confirmation falls inside the
//! requested range. Cost of goods sold comes from the cost records
//! written at shipment, so the report reflects the lots actually
//! drained rather than any reference price.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;
use shared::models::{PurchasePaymentStatus, ReceiptStatus, SalesPaymentStatus, ShipmentStatus};
use shared::types::DateRange;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    ledger: Arc<Ledger>,
}

/// One delivered order inside a profit and loss report
#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossLine {
    pub sales_order_id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub delivered_at: DateTime<Utc>,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
}

/// Profit and loss over a date range
#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossReport {
    pub range: DateRange,
    pub total_revenue: Decimal,
    pub total_cogs: Decimal,
    pub gross_profit: Decimal,
    pub orders: Vec<ProfitLossLine>,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub products: usize,
    pub warehouses: usize,
    pub suppliers: usize,
    pub customers: usize,
    pub purchase_orders: usize,
    pub purchase_orders_unpaid: usize,
    pub purchase_orders_pending_receipt: usize,
    pub sales_orders: usize,
    pub sales_orders_pending_shipment: usize,
    pub sales_orders_unpaid: usize,
    /// Units on hand across all warehouses, returned units included
    pub total_stock: Decimal,
}

impl ReportingService {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Profit and loss for orders delivered within the range
    pub async fn profit_loss(&self, range: DateRange) -> AppResult<ProfitLossReport> {
        if range.start > range.end {
            return Err(AppError::Validation {
                field: "date_range".to_string(),
                message: "Start date must not be after end date".to_string(),
                message_th: "วันที่เริ่มต้นต้องไม่เกินวันที่สิ้นสุด".to_string(),
            });
        }

        let mut orders = Vec::new();
        let mut total_revenue = Decimal::ZERO;
        let mut total_cogs = Decimal::ZERO;

        for order in self.ledger.list_sales_orders().await {
            let Some(delivered_at) = order.delivered_at else {
                continue;
            };
            if !range.contains(delivered_at.date_naive()) {
                continue;
            }

            let revenue = order.total_amount();
            let cogs: Decimal = self
                .ledger
                .cost_records_for_order(order.id)
                .await
                .iter()
                .map(|record| record.cost_total())
                .sum();

            total_revenue += revenue;
            total_cogs += cogs;
            orders.push(ProfitLossLine {
                sales_order_id: order.id,
                order_number: order.order_number,
                customer_id: order.customer_id,
                delivered_at,
                revenue,
                cogs,
                gross_profit: revenue - cogs,
            });
        }

        Ok(ProfitLossReport {
            range,
            total_revenue,
            total_cogs,
            gross_profit: total_revenue - total_cogs,
            orders,
        })
    }

    /// Get dashboard metrics
    pub async fn dashboard(&self) -> AppResult<DashboardMetrics> {
        let purchase_orders = self.ledger.list_purchase_orders().await;
        let sales_orders = self.ledger.list_sales_orders().await;

        let mut total_stock = Decimal::ZERO;
        for warehouse in self.ledger.list_warehouses().await {
            let stock = self.ledger.lock_stock(warehouse.id).await?;
            total_stock += stock.total_on_hand();
        }

        Ok(DashboardMetrics {
            products: self.ledger.list_products().await.len(),
            warehouses: self.ledger.list_warehouses().await.len(),
            suppliers: self.ledger.list_suppliers().await.len(),
            customers: self.ledger.list_customers().await.len(),
            purchase_orders: purchase_orders.len(),
            purchase_orders_unpaid: purchase_orders
                .iter()
                .filter(|o| o.payment_status == PurchasePaymentStatus::Unpaid)
                .count(),
            purchase_orders_pending_receipt: purchase_orders
                .iter()
                .filter(|o| o.receipt_status == ReceiptStatus::PendingReceipt)
                .count(),
            sales_orders: sales_orders.len(),
            sales_orders_pending_shipment: sales_orders
                .iter()
                .filter(|o| o.shipment_status == ShipmentStatus::Pending)
                .count(),
            sales_orders_unpaid: sales_orders
                .iter()
                .filter(|o| o.payment_status == SalesPaymentStatus::Unpaid)
                .count(),
            total_stock,
        })
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                crate::error::AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(wtr.into_inner().map_err(|e| {
            crate::error::AppError::Internal(format!("CSV writer error: {}", e))
        })?)
        .map_err(|e| crate::error::AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::services::{PurchasingService, SalesService};
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use shared::models::{
        CreatePurchaseOrderInput, CreatePurchaseOrderLineInput, CreateSalesOrderInput,
        CreateSalesOrderLineInput, Customer, Product, Supplier, Warehouse,
    };
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    struct Fixture {
        reporting: ReportingService,
        purchasing: PurchasingService,
        sales: SalesService,
        actor: Uuid,
        supplier_id: Uuid,
        customer_id: Uuid,
        warehouse_id: Uuid,
        product_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let ledger = Arc::new(Ledger::new(Duration::from_millis(200)));
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: "สหกรณ์ข้าวหอมมะลิ".to_string(),
            contact_person: "ประยุทธ นาดี".to_string(),
            phone: "0811111111".to_string(),
            address: "สุรินทร์".to_string(),
            created_at: Utc::now(),
        };
        let customer = Customer {
            id: Uuid::new_v4(),
            company_name: "บริษัทส่งออกข้าวไทย".to_string(),
            contact_person: "วิภา ค้าขาย".to_string(),
            phone: "0822222222".to_string(),
            address: "กรุงเทพมหานคร".to_string(),
            created_at: Utc::now(),
        };
        let warehouse = Warehouse {
            id: Uuid::new_v4(),
            name: "คลังสุรินทร์".to_string(),
            location: "Surin".to_string(),
            capacity: dec("1000"),
            created_at: Utc::now(),
        };
        let product = Product {
            id: Uuid::new_v4(),
            name: "Jasmine Rice".to_string(),
            unit: "kg".to_string(),
            reference_price: dec("45"),
            created_at: Utc::now(),
        };

        let fx = Fixture {
            reporting: ReportingService::new(ledger.clone()),
            purchasing: PurchasingService::new(ledger.clone()),
            sales: SalesService::new(ledger.clone()),
            actor: Uuid::new_v4(),
            supplier_id: supplier.id,
            customer_id: customer.id,
            warehouse_id: warehouse.id,
            product_id: product.id,
        };
        ledger.insert_supplier(supplier).await;
        ledger.insert_customer(customer).await;
        ledger.register_warehouse(warehouse).await;
        ledger.insert_product(product).await;
        fx
    }

    /// Runs one order through purchase, receipt, sale and delivery
    async fn delivered_order(fx: &Fixture) -> Uuid {
        let purchase = fx
            .purchasing
            .create_order(
                fx.actor,
                CreatePurchaseOrderInput {
                    supplier_id: fx.supplier_id,
                    warehouse_id: fx.warehouse_id,
                    lines: vec![
                        CreatePurchaseOrderLineInput {
                            product_id: fx.product_id,
                            quantity: dec("10"),
                            unit_cost: dec("1.00"),
                        },
                        CreatePurchaseOrderLineInput {
                            product_id: fx.product_id,
                            quantity: dec("10"),
                            unit_cost: dec("2.00"),
                        },
                    ],
                },
            )
            .await
            .unwrap();
        fx.purchasing
            .confirm_payment(purchase.id, fx.actor)
            .await
            .unwrap();
        fx.purchasing.receive(purchase.id, fx.actor).await.unwrap();

        let sale = fx
            .sales
            .create_order(
                fx.actor,
                CreateSalesOrderInput {
                    customer_id: fx.customer_id,
                    warehouse_id: fx.warehouse_id,
                    lines: vec![CreateSalesOrderLineInput {
                        product_id: fx.product_id,
                        quantity: dec("15"),
                        unit_price: dec("5.00"),
                    }],
                },
            )
            .await
            .unwrap();
        fx.sales.ship(sale.id, fx.actor).await.unwrap();
        fx.sales.confirm_delivery(sale.id, fx.actor).await.unwrap();
        sale.id
    }

    fn today_range() -> DateRange {
        let today = Utc::now().date_naive();
        DateRange {
            start: today,
            end: today,
        }
    }

    #[tokio::test]
    async fn test_profit_loss_uses_fifo_cost_records() {
        let fx = fixture().await;
        let sale_id = delivered_order(&fx).await;

        let report = fx.reporting.profit_loss(today_range()).await.unwrap();

        assert_eq!(report.orders.len(), 1);
        let line = &report.orders[0];
        assert_eq!(line.sales_order_id, sale_id);
        assert_eq!(line.revenue, dec("75.00"));
        assert_eq!(line.cogs, dec("20.00"));
        assert_eq!(line.gross_profit, dec("55.00"));
        assert_eq!(report.total_revenue, dec("75.00"));
        assert_eq!(report.total_cogs, dec("20.00"));
        assert_eq!(report.gross_profit, dec("55.00"));
    }

    #[tokio::test]
    async fn test_profit_loss_skips_undelivered_orders() {
        let fx = fixture().await;
        delivered_order(&fx).await;

        // a second order that only shipped stays out of the report
        let sale = fx
            .sales
            .create_order(
                fx.actor,
                CreateSalesOrderInput {
                    customer_id: fx.customer_id,
                    warehouse_id: fx.warehouse_id,
                    lines: vec![CreateSalesOrderLineInput {
                        product_id: fx.product_id,
                        quantity: dec("5"),
                        unit_price: dec("5.00"),
                    }],
                },
            )
            .await
            .unwrap();
        fx.sales.ship(sale.id, fx.actor).await.unwrap();

        let report = fx.reporting.profit_loss(today_range()).await.unwrap();
        assert_eq!(report.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_profit_loss_respects_the_range() {
        let fx = fixture().await;
        delivered_order(&fx).await;

        let yesterday = Utc::now().date_naive() - ChronoDuration::days(1);
        let report = fx
            .reporting
            .profit_loss(DateRange {
                start: yesterday,
                end: yesterday,
            })
            .await
            .unwrap();

        assert!(report.orders.is_empty());
        assert_eq!(report.total_revenue, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_profit_loss_rejects_inverted_range() {
        let fx = fixture().await;

        let err = fx
            .reporting
            .profit_loss(DateRange {
                start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_dashboard_counts_orders_by_state() {
        let fx = fixture().await;
        delivered_order(&fx).await;

        let metrics = fx.reporting.dashboard().await.unwrap();

        assert_eq!(metrics.products, 1);
        assert_eq!(metrics.warehouses, 1);
        assert_eq!(metrics.suppliers, 1);
        assert_eq!(metrics.customers, 1);
        assert_eq!(metrics.purchase_orders, 1);
        assert_eq!(metrics.purchase_orders_unpaid, 0);
        assert_eq!(metrics.purchase_orders_pending_receipt, 0);
        assert_eq!(metrics.sales_orders, 1);
        assert_eq!(metrics.sales_orders_pending_shipment, 0);
        assert_eq!(metrics.sales_orders_unpaid, 1);
        // 20 received, 15 shipped
        assert_eq!(metrics.total_stock, dec("5"));
    }

    #[tokio::test]
    async fn test_export_to_csv_writes_headers_and_rows() {
        let fx = fixture().await;
        delivered_order(&fx).await;

        let report = fx.reporting.profit_loss(today_range()).await.unwrap();
        let csv = ReportingService::export_to_csv(&report.orders).unwrap();

        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("order_number"));
        assert!(header.contains("revenue"));
        assert!(header.contains("cogs"));
        assert_eq!(lines.count(), 1);
    }
}
