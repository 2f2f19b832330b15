//! Route definitions for the AgriTrade inventory and order platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - employee administration
        .nest("/employees", employee_routes())
        // Protected routes - product catalog
        .nest("/products", product_routes())
        // Protected routes - warehouses
        .nest("/warehouses", warehouse_routes())
        // Protected routes - suppliers
        .nest("/suppliers", supplier_routes())
        // Protected routes - customers
        .nest("/customers", customer_routes())
        // Protected routes - purchase orders
        .nest("/purchase-orders", purchase_order_routes())
        // Protected routes - sales orders
        .nest("/sales-orders", sales_order_routes())
        // Protected routes - stock visibility
        .nest("/stock", stock_routes())
        // Protected routes - reporting
        .nest("/reports", report_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        // Current user profile (protected)
        .nest("/me", me_routes())
}

/// Current user routes (protected)
fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::me))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Employee administration routes (protected, admin only)
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_employees))
        .route("/:employee_id", get(handlers::get_employee))
        .route("/:employee_id/suspend", post(handlers::suspend_employee))
        .route("/:employee_id/unsuspend", post(handlers::unsuspend_employee))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:product_id", get(handlers::get_product))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Warehouse routes (protected)
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_warehouses).post(handlers::create_warehouse))
        .route("/:warehouse_id", get(handlers::get_warehouse))
        .route("/:warehouse_id/summary", get(handlers::get_warehouse_summary))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route("/:supplier_id", get(handlers::get_supplier))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Customer routes (protected)
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_customers).post(handlers::create_customer))
        .route("/:customer_id", get(handlers::get_customer))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase order routes (protected)
fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_purchase_orders).post(handlers::create_purchase_order))
        .route("/pending-receipts", get(handlers::list_pending_receipts))
        .route("/:order_id", get(handlers::get_purchase_order))
        .route("/:order_id/pay", post(handlers::pay_purchase_order))
        .route("/:order_id/receive", post(handlers::receive_purchase_order))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Sales order routes (protected)
fn sales_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales_orders).post(handlers::create_sales_order))
        .route("/:order_id", get(handlers::get_sales_order))
        .route("/:order_id/ship", post(handlers::ship_sales_order))
        .route("/:order_id/deliver", post(handlers::confirm_delivery))
        .route("/:order_id/request-return", post(handlers::request_return))
        .route("/:order_id/confirm-return", post(handlers::confirm_return))
        .route("/:order_id/pay", post(handlers::pay_sales_order))
        .route("/:order_id/cost-records", get(handlers::get_cost_records))
        .route("/:order_id/return-events", get(handlers::get_return_events))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock visibility routes (protected)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_stock_levels))
        .route("/lots", get(handlers::get_lot_history))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/profit-loss", get(handlers::get_profit_loss_report))
        .route_layer(middleware::from_fn(auth_middleware))
}
