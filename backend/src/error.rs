//! Error handling for the StockOptame server
//!
//! Provides consistent error responses in English and Bahasa Indonesia

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::LedgerError;
use thiserror::Error;

use crate::store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Business rule rejections
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_id: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    // Storage errors
    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
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
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

fn ledger_response(err: &LedgerError) -> (StatusCode, ErrorDetail) {
    let code = err.code().to_string();
    match err {
        LedgerError::InvalidInput(msg) => (
            StatusCode::BAD_REQUEST,
            ErrorDetail {
                code,
                message_en: msg.clone(),
                message_id: format!("Input tidak valid: {}", msg),
                field: None,
            },
        ),
        LedgerError::IngredientNotFound(key) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_id: format!("Data stok untuk \"{}\" tidak ditemukan", key),
                field: Some(key.clone()),
            },
        ),
        LedgerError::InsufficientStock { stock_item, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_id: format!("Stok {} tidak cukup", stock_item),
                field: Some(stock_item.clone()),
            },
        ),
        LedgerError::MissingReason => (
            StatusCode::BAD_REQUEST,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_id: "Mohon isi alasan pembatalan".to_string(),
                field: Some("reason".to_string()),
            },
        ),
        LedgerError::AlreadyCancelled(_) => (
            StatusCode::CONFLICT,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_id: "Penjualan ini sudah dibatalkan".to_string(),
                field: None,
            },
        ),
        LedgerError::NotFound(resource) => (
            StatusCode::NOT_FOUND,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_id: format!("{} tidak ditemukan", resource),
                field: None,
            },
        ),
        LedgerError::DuplicateName(name) => (
            StatusCode::CONFLICT,
            ErrorDetail {
                code,
                message_en: format!("An entry named {} already exists", name),
                message_id: format!("Nama {} sudah ada", name),
                field: Some("name".to_string()),
            },
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Ledger(err) => ledger_response(err),
            AppError::Validation { field, message, message_id } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_id: message_id.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_id: format!("Data tidak valid: {}", msg),
                    field: None,
                },
            ),
            AppError::PersistenceFailure(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "PERSISTENCE_FAILURE".to_string(),
                    message_en: format!(
                        "The change was applied but could not be saved: {}",
                        err
                    ),
                    message_id: "Perubahan diterapkan tetapi gagal disimpan".to_string(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_id: format!("Kesalahan konfigurasi: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_id: "Terjadi kesalahan pada server".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_id: "Terjadi kesalahan pada server".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
