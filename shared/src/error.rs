//! Ledger rejection reasons
//!
//! Every catalog and ledger operation returns one of these instead of
//! panicking, so callers can render a message and keep the old snapshot.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No stock item matches ingredient \"{0}\"")]
    IngredientNotFound(String),

    #[error("Insufficient stock of {stock_item}: required {required}, available {available}")]
    InsufficientStock {
        stock_item: String,
        required: Decimal,
        available: Decimal,
    },

    #[error("A cancellation reason is required")]
    MissingReason,

    #[error("Sale {0} is already cancelled")]
    AlreadyCancelled(Uuid),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),
}

impl LedgerError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidInput(_) => "INVALID_INPUT",
            LedgerError::IngredientNotFound(_) => "INGREDIENT_NOT_FOUND",
            LedgerError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            LedgerError::MissingReason => "MISSING_REASON",
            LedgerError::AlreadyCancelled(_) => "ALREADY_CANCELLED",
            LedgerError::NotFound(_) => "NOT_FOUND",
            LedgerError::DuplicateName(_) => "DUPLICATE_NAME",
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
