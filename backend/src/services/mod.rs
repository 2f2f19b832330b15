//! Business logic services for the AgriTrade Platform

pub mod auth;
pub mod catalog;
pub mod employees;
pub mod partners;
pub mod purchasing;
pub mod reporting;
pub mod sales;
pub mod stock;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use employees::EmployeeService;
pub use partners::PartnerService;
pub use purchasing::PurchasingService;
pub use reporting::ReportingService;
pub use sales::SalesService;
pub use stock::StockService;
