//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::services::auth::{LoginResponse, RegisterResponse};
use crate::services::AuthService;
use crate::AppState;
use shared::models::{CreateEmployeeInput, Employee};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth_service = AuthService::new(state.ledger.clone(), &state.config);
    let response = auth_service.login(&body.username, &body.password).await?;

    Ok(Json(response))
}

/// Register employee endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeInput>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let auth_service = AuthService::new(state.ledger.clone(), &state.config);
    let result = auth_service.register(body).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Current user profile endpoint handler
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Employee>, AppError> {
    let auth_service = AuthService::new(state.ledger.clone(), &state.config);
    let employee = auth_service.me(user.0.employee_id).await?;

    Ok(Json(employee))
}
