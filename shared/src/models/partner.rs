//! Trading partner models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A produce supplier the platform buys from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// A business customer the platform sells to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a supplier
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub contact_person: String,
    pub phone: String,
    #[validate(length(max = 300))]
    pub address: String,
}

/// Input for registering a customer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, max = 100))]
    pub company_name: String,
    #[validate(length(min = 1, max = 100))]
    pub contact_person: String,
    pub phone: String,
    #[validate(length(max = 300))]
    pub address: String,
}
