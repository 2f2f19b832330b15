//! Top-level in-memory store
//!
//! `Ledger` owns every entity map and the per-warehouse stock
//! partitions. Entity maps sit behind `RwLock`s; partitions behind
//! their own mutexes handed out through `lock_stock`, which bounds the
//! wait so a stuck transaction surfaces as a retryable error instead
//! of piling callers up behind it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shared::models::{
    CostRecord, Customer, Employee, Product, PurchaseOrder, ReturnEvent, SalesOrder, Supplier,
    Warehouse,
};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::time::timeout;
use uuid::Uuid;

use crate::error::AppError;

use super::stock::WarehouseStock;

pub struct Ledger {
    lock_timeout: Duration,
    employees: RwLock<HashMap<Uuid, Employee>>,
    products: RwLock<HashMap<Uuid, Product>>,
    warehouses: RwLock<HashMap<Uuid, Warehouse>>,
    suppliers: RwLock<HashMap<Uuid, Supplier>>,
    customers: RwLock<HashMap<Uuid, Customer>>,
    purchase_orders: RwLock<HashMap<Uuid, PurchaseOrder>>,
    sales_orders: RwLock<HashMap<Uuid, SalesOrder>>,
    cost_records: RwLock<Vec<CostRecord>>,
    return_events: RwLock<Vec<ReturnEvent>>,
    stock: RwLock<HashMap<Uuid, Arc<Mutex<WarehouseStock>>>>,
    next_employee_number: AtomicU64,
    next_po_number: AtomicU64,
    next_so_number: AtomicU64,
}

impl Ledger {
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            lock_timeout,
            employees: RwLock::new(HashMap::new()),
            products: RwLock::new(HashMap::new()),
            warehouses: RwLock::new(HashMap::new()),
            suppliers: RwLock::new(HashMap::new()),
            customers: RwLock::new(HashMap::new()),
            purchase_orders: RwLock::new(HashMap::new()),
            sales_orders: RwLock::new(HashMap::new()),
            cost_records: RwLock::new(Vec::new()),
            return_events: RwLock::new(Vec::new()),
            stock: RwLock::new(HashMap::new()),
            next_employee_number: AtomicU64::new(0),
            next_po_number: AtomicU64::new(0),
            next_so_number: AtomicU64::new(0),
        }
    }

    // ---- stock partitions ----

    /// Locks the stock partition of one warehouse, waiting at most the
    /// configured timeout. The guard is owned, so it can cross awaits.
    pub async fn lock_stock(
        &self,
        warehouse_id: Uuid,
    ) -> Result<OwnedMutexGuard<WarehouseStock>, AppError> {
        let partition = {
            let stock = self.stock.read().await;
            stock
                .get(&warehouse_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))?
        };
        timeout(self.lock_timeout, partition.lock_owned())
            .await
            .map_err(|_| AppError::LockTimeout)
    }

    // ---- employees ----

    pub fn next_employee_code(&self) -> String {
        let n = self.next_employee_number.fetch_add(1, Ordering::SeqCst) + 1;
        format!("E{:03}", n)
    }

    pub async fn insert_employee(&self, employee: Employee) {
        self.employees.write().await.insert(employee.id, employee);
    }

    pub async fn get_employee(&self, id: Uuid) -> Option<Employee> {
        self.employees.read().await.get(&id).cloned()
    }

    pub async fn find_employee_by_username(&self, username: &str) -> Option<Employee> {
        self.employees
            .read()
            .await
            .values()
            .find(|e| e.username == username)
            .cloned()
    }

    /// True when the username or national id is already registered
    pub async fn employee_identity_taken(&self, username: &str, national_id: &str) -> bool {
        self.employees
            .read()
            .await
            .values()
            .any(|e| e.username == username || e.national_id == national_id)
    }

    pub async fn list_employees(&self) -> Vec<Employee> {
        let mut employees: Vec<_> = self.employees.read().await.values().cloned().collect();
        employees.sort_by(|a, b| a.employee_code.cmp(&b.employee_code));
        employees
    }

    pub async fn update_employee<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Employee) -> Result<T, AppError>,
    {
        let mut employees = self.employees.write().await;
        let employee = employees
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;
        f(employee)
    }

    // ---- products ----

    pub async fn insert_product(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }

    pub async fn get_product(&self, id: Uuid) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }

    pub async fn list_products(&self) -> Vec<Product> {
        let mut products: Vec<_> = self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        products
    }

    pub async fn product_names(&self, ids: impl IntoIterator<Item = Uuid>) -> HashMap<Uuid, String> {
        let products = self.products.read().await;
        ids.into_iter()
            .filter_map(|id| products.get(&id).map(|p| (id, p.name.clone())))
            .collect()
    }

    // ---- warehouses ----

    /// Inserts the warehouse and creates its empty stock partition
    pub async fn register_warehouse(&self, warehouse: Warehouse) {
        let partition = WarehouseStock::new(warehouse.id, warehouse.capacity);
        self.warehouses
            .write()
            .await
            .insert(warehouse.id, warehouse.clone());
        self.stock
            .write()
            .await
            .insert(warehouse.id, Arc::new(Mutex::new(partition)));
    }

    pub async fn get_warehouse(&self, id: Uuid) -> Option<Warehouse> {
        self.warehouses.read().await.get(&id).cloned()
    }

    pub async fn list_warehouses(&self) -> Vec<Warehouse> {
        let mut warehouses: Vec<_> = self.warehouses.read().await.values().cloned().collect();
        warehouses.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        warehouses
    }

    // ---- trading partners ----

    pub async fn insert_supplier(&self, supplier: Supplier) {
        self.suppliers.write().await.insert(supplier.id, supplier);
    }

    pub async fn get_supplier(&self, id: Uuid) -> Option<Supplier> {
        self.suppliers.read().await.get(&id).cloned()
    }

    pub async fn list_suppliers(&self) -> Vec<Supplier> {
        let mut suppliers: Vec<_> = self.suppliers.read().await.values().cloned().collect();
        suppliers.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        suppliers
    }

    pub async fn insert_customer(&self, customer: Customer) {
        self.customers.write().await.insert(customer.id, customer);
    }

    pub async fn get_customer(&self, id: Uuid) -> Option<Customer> {
        self.customers.read().await.get(&id).cloned()
    }

    pub async fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<_> = self.customers.read().await.values().cloned().collect();
        customers.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        customers
    }

    // ---- purchase orders ----

    pub fn next_purchase_order_number(&self) -> String {
        let n = self.next_po_number.fetch_add(1, Ordering::SeqCst) + 1;
        format!("PO{:03}", n)
    }

    pub async fn insert_purchase_order(&self, order: PurchaseOrder) {
        self.purchase_orders.write().await.insert(order.id, order);
    }

    pub async fn get_purchase_order(&self, id: Uuid) -> Option<PurchaseOrder> {
        self.purchase_orders.read().await.get(&id).cloned()
    }

    pub async fn list_purchase_orders(&self) -> Vec<PurchaseOrder> {
        let mut orders: Vec<_> = self.purchase_orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.order_number.cmp(&b.order_number))
        });
        orders
    }

    pub async fn update_purchase_order<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut PurchaseOrder) -> Result<T, AppError>,
    {
        let mut orders = self.purchase_orders.write().await;
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;
        f(order)
    }

    // ---- sales orders ----

    pub fn next_sales_order_number(&self) -> String {
        let n = self.next_so_number.fetch_add(1, Ordering::SeqCst) + 1;
        format!("SO{:03}", n)
    }

    pub async fn insert_sales_order(&self, order: SalesOrder) {
        self.sales_orders.write().await.insert(order.id, order);
    }

    pub async fn get_sales_order(&self, id: Uuid) -> Option<SalesOrder> {
        self.sales_orders.read().await.get(&id).cloned()
    }

    pub async fn list_sales_orders(&self) -> Vec<SalesOrder> {
        let mut orders: Vec<_> = self.sales_orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.order_number.cmp(&b.order_number))
        });
        orders
    }

    pub async fn update_sales_order<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut SalesOrder) -> Result<T, AppError>,
    {
        let mut orders = self.sales_orders.write().await;
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Sales order".to_string()))?;
        f(order)
    }

    // ---- cost records ----

    pub async fn append_cost_records(&self, records: Vec<CostRecord>) {
        self.cost_records.write().await.extend(records);
    }

    pub async fn cost_records_for_order(&self, sales_order_id: Uuid) -> Vec<CostRecord> {
        self.cost_records
            .read()
            .await
            .iter()
            .filter(|r| r.sales_order_id == sales_order_id)
            .cloned()
            .collect()
    }

    // ---- return events ----

    pub async fn append_return_events(&self, events: Vec<ReturnEvent>) {
        self.return_events.write().await.extend(events);
    }

    pub async fn return_events_for_order(&self, sales_order_id: Uuid) -> Vec<ReturnEvent> {
        self.return_events
            .read()
            .await
            .iter()
            .filter(|e| e.sales_order_id == sales_order_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn test_ledger() -> Ledger {
        Ledger::new(Duration::from_millis(50))
    }

    fn warehouse(capacity: &str) -> Warehouse {
        Warehouse {
            id: Uuid::new_v4(),
            name: "คลังเชียงใหม่".to_string(),
            location: "Chiang Mai".to_string(),
            capacity: capacity.parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_lock_stock_unknown_warehouse_is_not_found() {
        let ledger = test_ledger();
        let err = ledger.lock_stock(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_lock_stock_times_out_when_partition_is_held() {
        let ledger = test_ledger();
        let wh = warehouse("100");
        let id = wh.id;
        ledger.register_warehouse(wh).await;

        let _guard = ledger.lock_stock(id).await.unwrap();

        let err = ledger.lock_stock(id).await.unwrap_err();
        assert!(matches!(err, AppError::LockTimeout));
    }

    #[tokio::test]
    async fn test_register_warehouse_creates_an_empty_partition() {
        let ledger = test_ledger();
        let wh = warehouse("250");
        let id = wh.id;
        ledger.register_warehouse(wh).await;

        let stock = ledger.lock_stock(id).await.unwrap();
        assert_eq!(stock.capacity(), Decimal::from(250));
        assert_eq!(stock.total_on_hand(), Decimal::ZERO);
    }

    #[test]
    fn test_document_numbers_are_sequential() {
        let ledger = test_ledger();
        assert_eq!(ledger.next_purchase_order_number(), "PO001");
        assert_eq!(ledger.next_purchase_order_number(), "PO002");
        assert_eq!(ledger.next_sales_order_number(), "SO001");
        assert_eq!(ledger.next_employee_code(), "E001");
    }
}
