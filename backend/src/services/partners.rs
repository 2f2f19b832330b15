//! Trading partner service for suppliers and customers

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;
use shared::models::{CreateCustomerInput, CreateSupplierInput, Customer, Supplier};
use shared::validation::validate_thai_phone;

/// Trading partner service
#[derive(Clone)]
pub struct PartnerService {
    ledger: Arc<Ledger>,
}

impl PartnerService {
    /// Create a new PartnerService instance
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Register a supplier
    pub async fn create_supplier(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Err(message) = validate_thai_phone(&input.phone) {
            return Err(AppError::Validation {
                field: "phone".to_string(),
                message: message.to_string(),
                message_th: "เบอร์โทรศัพท์ไม่ถูกต้อง".to_string(),
            });
        }

        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: input.name,
            contact_person: input.contact_person,
            phone: input.phone,
            address: input.address,
            created_at: Utc::now(),
        };
        self.ledger.insert_supplier(supplier.clone()).await;

        Ok(supplier)
    }

    /// List all suppliers
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        Ok(self.ledger.list_suppliers().await)
    }

    /// Get a supplier by id
    pub async fn get_supplier(&self, id: Uuid) -> AppResult<Supplier> {
        self.ledger
            .get_supplier(id)
            .await
            .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Register a customer
    pub async fn create_customer(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Err(message) = validate_thai_phone(&input.phone) {
            return Err(AppError::Validation {
                field: "phone".to_string(),
                message: message.to_string(),
                message_th: "เบอร์โทรศัพท์ไม่ถูกต้อง".to_string(),
            });
        }

        let customer = Customer {
            id: Uuid::new_v4(),
            company_name: input.company_name,
            contact_person: input.contact_person,
            phone: input.phone,
            address: input.address,
            created_at: Utc::now(),
        };
        self.ledger.insert_customer(customer.clone()).await;

        Ok(customer)
    }

    /// List all customers
    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        Ok(self.ledger.list_customers().await)
    }

    /// Get a customer by id
    pub async fn get_customer(&self, id: Uuid) -> AppResult<Customer> {
        self.ledger
            .get_customer(id)
            .await
            .ok_or_else(|| AppError::NotFound("Customer".to_string()))
    }
}
