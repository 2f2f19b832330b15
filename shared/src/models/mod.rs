//! Domain models for the AgriTrade Platform

mod lot;
mod partner;
mod product;
mod purchase_order;
mod sales_order;
mod user;
mod warehouse;

pub use lot::*;
pub use partner::*;
pub use product::*;
pub use purchase_order::*;
pub use sales_order::*;
pub use user::*;
pub use warehouse::*;
