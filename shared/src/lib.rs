//! Shared types and models for the AgriTrade Platform
//!
//! This crate contains the domain model shared between the backend service
//! and other components of the system: catalog and partner records, the
//! purchase and sales order state machines, stock ledger records, and the
//! validation helpers used on their inputs.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
