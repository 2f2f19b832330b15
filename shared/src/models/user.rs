//! Employee account and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Access level of an employee account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// An employee account on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    /// Sequential employee code (e.g., "E001")
    pub employee_code: String,
    pub name: String,
    pub gender: Gender,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub position: String,
    pub role: Role,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Suspended accounts keep their history but cannot log in
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering an employee account
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Gender,
    pub national_id: String,
    pub phone: String,
    #[validate(length(max = 50))]
    pub email: String,
    #[validate(length(max = 200))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    pub role: Role,
    pub username: String,
    pub password: String,
}
