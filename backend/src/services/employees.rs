//! Employee administration service
//!
//! Account creation lives in the auth service; this one covers the
//! admin views and account suspension.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;
use shared::models::Employee;

/// Employee administration service
#[derive(Clone)]
pub struct EmployeeService {
    ledger: Arc<Ledger>,
}

impl EmployeeService {
    /// Create a new EmployeeService instance
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// List all employee accounts
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        Ok(self.ledger.list_employees().await)
    }

    /// Get an employee by id
    pub async fn get(&self, id: Uuid) -> AppResult<Employee> {
        self.ledger
            .get_employee(id)
            .await
            .ok_or_else(|| AppError::NotFound("Employee".to_string()))
    }

    /// Suspend an account. The employee keeps their history but can no
    /// longer log in.
    pub async fn suspend(&self, id: Uuid) -> AppResult<Employee> {
        self.ledger
            .update_employee(id, |employee| {
                employee.is_active = false;
                employee.updated_at = Utc::now();
                Ok(employee.clone())
            })
            .await
    }

    /// Lift a suspension
    pub async fn unsuspend(&self, id: Uuid) -> AppResult<Employee> {
        self.ledger
            .update_employee(id, |employee| {
                employee.is_active = true;
                employee.updated_at = Utc::now();
                Ok(employee.clone())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Gender, Role};
    use std::time::Duration;

    fn service() -> (EmployeeService, Arc<Ledger>) {
        let ledger = Arc::new(Ledger::new(Duration::from_millis(50)));
        (EmployeeService::new(ledger.clone()), ledger)
    }

    fn employee() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            employee_code: "E001".to_string(),
            name: "สมชาย ใจดี".to_string(),
            gender: Gender::Male,
            national_id: "1100700000001".to_string(),
            phone: "0812345678".to_string(),
            email: "somchai@agritrade.co.th".to_string(),
            address: "99/1 ถนนห้วยแก้ว เชียงใหม่".to_string(),
            position: "Purchasing Officer".to_string(),
            role: Role::Staff,
            username: "somchai".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_suspend_and_unsuspend_toggle_the_active_flag() {
        let (employees, ledger) = service();
        let account = employee();
        let id = account.id;
        ledger.insert_employee(account).await;

        let suspended = employees.suspend(id).await.unwrap();
        assert!(!suspended.is_active);

        let restored = employees.unsuspend(id).await.unwrap();
        assert!(restored.is_active);
        assert_eq!(employees.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_suspending_a_missing_employee_is_not_found() {
        let (employees, _ledger) = service();

        let err = employees.suspend(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
