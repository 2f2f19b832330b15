//! HTTP handlers for employee administration endpoints
//!
//! All routes here require the admin role.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::EmployeeService;
use crate::AppState;
use shared::models::Employee;

/// List all employees
pub async fn list_employees(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Employee>>> {
    require_admin(&current_user.0)?;
    let service = EmployeeService::new(state.ledger);
    let employees = service.list().await?;
    Ok(Json(employees))
}

/// Get an employee by id
pub async fn get_employee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    require_admin(&current_user.0)?;
    let service = EmployeeService::new(state.ledger);
    let employee = service.get(employee_id).await?;
    Ok(Json(employee))
}

/// Suspend an employee account
pub async fn suspend_employee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    require_admin(&current_user.0)?;
    let service = EmployeeService::new(state.ledger);
    let employee = service.suspend(employee_id).await?;
    Ok(Json(employee))
}

/// Reinstate a suspended employee account
pub async fn unsuspend_employee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    require_admin(&current_user.0)?;
    let service = EmployeeService::new(state.ledger);
    let employee = service.unsuspend(employee_id).await?;
    Ok(Json(employee))
}
