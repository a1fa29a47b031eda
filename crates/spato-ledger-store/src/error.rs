//! Error types for ledger storage.

use spato_ledger_core::LedgerError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was missing.
        entity: &'static str,
        /// The looked-up ID.
        id: String,
    },

    /// Record already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// The kind of record that collided.
        entity: &'static str,
        /// The colliding ID.
        id: String,
    },

    /// Insufficient funds for a debit.
    #[error("insufficient funds: available={available}, required={required}")]
    InsufficientFunds {
        /// Current balance of the targeted field, in units.
        available: i64,
        /// Required amount in units.
        required: i64,
    },

    /// A request with this idempotency key was already applied.
    #[error("duplicate request: {request_id}")]
    DuplicateRequest {
        /// The idempotency key that was duplicated.
        request_id: String,
    },
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(msg) => Self::Storage(msg),
            StoreError::Serialization(msg) => Self::Serialization(msg),
            StoreError::NotFound { entity, id } => match entity {
                "transaction" => Self::TransactionNotFound { transaction_id: id },
                _ => Self::AccountNotFound { account_id: id },
            },
            StoreError::AlreadyExists { id, .. } => Self::AccountAlreadyExists { account_id: id },
            StoreError::InsufficientFunds {
                available,
                required,
            } => Self::InsufficientFunds {
                available,
                required,
            },
            StoreError::DuplicateRequest { request_id } => Self::DuplicateRequest { request_id },
        }
    }
}
