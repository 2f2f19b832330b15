//! HTTP request handlers

pub mod auth;
pub mod catalog;
pub mod employees;
pub mod health;
pub mod partners;
pub mod purchasing;
pub mod reporting;
pub mod sales;
pub mod stock;

pub use auth::*;
pub use catalog::*;
pub use employees::*;
pub use health::*;
pub use partners::*;
pub use purchasing::*;
pub use reporting::*;
pub use sales::*;
pub use stock::*;
