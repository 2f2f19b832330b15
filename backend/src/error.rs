//! Error handling for the AgriTrade Platform
//!
//! Provides consistent error responses in Thai and English

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::StateError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        message_th: String,
    },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_th: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Conflict: {message}")]
    Conflict {
        resource: String,
        message: String,
        message_th: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Invalid order state: {0}")]
    State(#[from] StateError),

    #[error("Insufficient stock of {product}")]
    InsufficientStock {
        product: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Stock exhausted for {product}")]
    StockExhausted {
        product: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Warehouse capacity exceeded")]
    CapacityExceeded {
        capacity: Decimal,
        current: Decimal,
        requested: Decimal,
    },

    // Concurrency errors
    #[error("Timed out waiting for the warehouse ledger")]
    LockTimeout,

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<crate::ledger::StockError> for AppError {
    fn from(err: crate::ledger::StockError) -> Self {
        use crate::ledger::StockError;
        match err {
            StockError::CapacityExceeded { capacity, current, requested } => {
                AppError::CapacityExceeded { capacity, current, requested }
            }
            // Callers that know the product name substitute it; the id
            // is the fallback
            StockError::Exhausted { product_id, requested, available } => {
                AppError::StockExhausted {
                    product: product_id.to_string(),
                    requested,
                    available,
                }
            }
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_th: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

fn state_detail(err: StateError) -> ErrorDetail {
    let (code, message_en, message_th) = match err {
        StateError::AlreadyPaid => (
            "ALREADY_PAID",
            "Order is already paid".to_string(),
            "คำสั่งนี้ชำระเงินแล้ว".to_string(),
        ),
        StateError::NotYetPaid => (
            "NOT_YET_PAID",
            "Order has not been paid yet".to_string(),
            "คำสั่งนี้ยังไม่ได้ชำระเงิน".to_string(),
        ),
        StateError::AlreadyReceived => (
            "ALREADY_RECEIVED",
            "Order has already been received".to_string(),
            "คำสั่งซื้อนี้รับสินค้าเข้าคลังแล้ว".to_string(),
        ),
        StateError::NotPending => (
            "NOT_PENDING",
            "Order is not pending shipment".to_string(),
            "คำสั่งขายนี้ไม่ได้อยู่ในสถานะรอจัดส่ง".to_string(),
        ),
        StateError::NotShipped => (
            "NOT_SHIPPED",
            "Order has not been shipped".to_string(),
            "คำสั่งขายนี้ยังไม่ได้จัดส่ง".to_string(),
        ),
        StateError::NotDelivered => (
            "NOT_DELIVERED",
            "Order has not been delivered".to_string(),
            "คำสั่งขายนี้ยังไม่ได้ส่งมอบ".to_string(),
        ),
        StateError::NoReturnRequested => (
            "NO_RETURN_REQUESTED",
            "No return has been requested for this order".to_string(),
            "ไม่มีคำขอคืนสินค้าสำหรับคำสั่งขายนี้".to_string(),
        ),
    };
    ErrorDetail {
        code: code.to_string(),
        message_en,
        message_th,
        field: None,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message_en: "Invalid username or password".to_string(),
                    message_th: "ชื่อผู้ใช้หรือรหัสผ่านไม่ถูกต้อง".to_string(),
                    field: None,
                },
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "TOKEN_EXPIRED".to_string(),
                    message_en: "Token has expired".to_string(),
                    message_th: "โทเค็นหมดอายุแล้ว".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message_en: "Invalid token".to_string(),
                    message_th: "โทเค็นไม่ถูกต้อง".to_string(),
                    field: None,
                },
            ),
            AppError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorDetail {
                    code: "INSUFFICIENT_PERMISSIONS".to_string(),
                    message_en: "You do not have permission to perform this action".to_string(),
                    message_th: "คุณไม่มีสิทธิ์ในการดำเนินการนี้".to_string(),
                    field: None,
                },
            ),
            AppError::Unauthorized { message, message_th } => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message_en: message.clone(),
                    message_th: message_th.clone(),
                    field: None,
                },
            ),
            AppError::Validation { field, message, message_th } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_th: message_th.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_th: format!("ข้อมูลไม่ถูกต้อง: {}", msg),
                    field: None,
                },
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message_en: format!("A record with this {} already exists", field),
                    message_th: format!("มีข้อมูล {} นี้อยู่แล้ว", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::Conflict { resource, message, message_th } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONFLICT".to_string(),
                    message_en: message.clone(),
                    message_th: message_th.clone(),
                    field: Some(resource.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_th: format!("ไม่พบ {}", resource),
                    field: None,
                },
            ),
            AppError::State(err) => (StatusCode::UNPROCESSABLE_ENTITY, state_detail(*err)),
            AppError::InsufficientStock { product, requested, available } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: format!(
                        "Insufficient stock of {}: requested {}, available {}",
                        product, requested, available
                    ),
                    message_th: format!(
                        "สินค้า {} มีไม่เพียงพอ: ต้องการ {} คงเหลือ {}",
                        product, requested, available
                    ),
                    field: None,
                },
            ),
            AppError::StockExhausted { product, requested, available } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "STOCK_EXHAUSTED".to_string(),
                    message_en: format!(
                        "Stock of {} is exhausted: requested {}, lots held only {}",
                        product, requested, available
                    ),
                    message_th: format!(
                        "สต็อกของ {} หมด: ต้องการ {} แต่ล็อตคงเหลือเพียง {}",
                        product, requested, available
                    ),
                    field: None,
                },
            ),
            AppError::CapacityExceeded { capacity, current, requested } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "CAPACITY_EXCEEDED".to_string(),
                    message_en: format!(
                        "Warehouse capacity exceeded: capacity {}, holding {}, receiving {}",
                        capacity, current, requested
                    ),
                    message_th: format!(
                        "เกินความจุคลังสินค้า: ความจุ {} ปัจจุบัน {} รับเข้า {}",
                        capacity, current, requested
                    ),
                    field: None,
                },
            ),
            AppError::LockTimeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "LOCK_TIMEOUT".to_string(),
                    message_en: "The warehouse is busy processing another transaction, please retry"
                        .to_string(),
                    message_th: "ระบบกำลังประมวลผลรายการอื่นอยู่ กรุณาลองใหม่อีกครั้ง".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_th: "เกิดข้อผิดพลาดภายในเซิร์ฟเวอร์".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_th: "เกิดข้อผิดพลาดภายในเซิร์ฟเวอร์".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
