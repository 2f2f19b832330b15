//! Authentication service for employee registration, login, and token management

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;
use shared::models::{CreateEmployeeInput, Employee, Role};
use shared::validation::{
    validate_password, validate_thai_national_id, validate_thai_phone, validate_username,
};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    ledger: Arc<Ledger>,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Employee identity returned alongside a token
#[derive(Debug, Serialize)]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub employee_code: String,
    pub name: String,
    pub role: Role,
}

/// Response after successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: EmployeeSummary,
}

/// Response after successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub employee_id: Uuid,
    pub employee_code: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Employee ID
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(ledger: Arc<Ledger>, config: &Config) -> Self {
        Self {
            ledger,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a new employee account
    pub async fn register(&self, input: CreateEmployeeInput) -> AppResult<RegisterResponse> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Err(message) = validate_username(&input.username) {
            return Err(AppError::Validation {
                field: "username".to_string(),
                message: message.to_string(),
                message_th: "ชื่อผู้ใช้ต้องยาว 3-20 ตัวอักษร ใช้ได้เฉพาะตัวอักษร ตัวเลข . _ -".to_string(),
            });
        }

        if let Err(message) = validate_password(&input.password) {
            return Err(AppError::Validation {
                field: "password".to_string(),
                message: message.to_string(),
                message_th: "รหัสผ่านต้องมีอย่างน้อย 8 ตัวอักษร".to_string(),
            });
        }

        if let Err(message) = validate_thai_phone(&input.phone) {
            return Err(AppError::Validation {
                field: "phone".to_string(),
                message: message.to_string(),
                message_th: "เบอร์โทรศัพท์ไม่ถูกต้อง".to_string(),
            });
        }

        if let Err(message) = validate_thai_national_id(&input.national_id) {
            return Err(AppError::Validation {
                field: "national_id".to_string(),
                message: message.to_string(),
                message_th: "เลขบัตรประชาชนไม่ถูกต้อง".to_string(),
            });
        }

        if self
            .ledger
            .employee_identity_taken(&input.username, &input.national_id)
            .await
        {
            return Err(AppError::Conflict {
                resource: "employee".to_string(),
                message: "Username or national id is already registered".to_string(),
                message_th: "Username หรือ เลขบัตรประชาชนนี้มีอยู่ในระบบแล้ว".to_string(),
            });
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            employee_code: self.ledger.next_employee_code(),
            name: input.name,
            gender: input.gender,
            national_id: input.national_id,
            phone: input.phone,
            email: input.email,
            address: input.address,
            position: input.position,
            role: input.role,
            username: input.username,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.ledger.insert_employee(employee.clone()).await;

        let access_token = self.generate_token(&employee)?;

        Ok(RegisterResponse {
            employee_id: employee.id,
            employee_code: employee.employee_code,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Authenticate an employee with username and password
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let employee = self
            .ledger
            .find_employee_by_username(username)
            .await
            .ok_or(AppError::InvalidCredentials)?;

        // Check if the account is active
        if !employee.is_active {
            return Err(AppError::Unauthorized {
                message: "Account is suspended".to_string(),
                message_th: "บัญชีถูกระงับ".to_string(),
            });
        }

        // Verify password
        let valid = verify(password, &employee.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.generate_token(&employee)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            user: EmployeeSummary {
                id: employee.id,
                employee_code: employee.employee_code,
                name: employee.name,
                role: employee.role,
            },
        })
    }

    /// The employee behind an authenticated request
    pub async fn me(&self, employee_id: Uuid) -> AppResult<Employee> {
        self.ledger
            .get_employee(employee_id)
            .await
            .ok_or_else(|| AppError::NotFound("Employee".to_string()))
    }

    /// Validate access token and return claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Unauthorized {
            message: format!("Invalid token: {}", e),
            message_th: "โทเค็นไม่ถูกต้อง".to_string(),
        })?;

        Ok(token_data.claims)
    }

    /// Generate an access token for an employee
    fn generate_token(&self, employee: &Employee) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: employee.id.to_string(),
            role: employee.role.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}
