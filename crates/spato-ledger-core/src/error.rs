//! Error types for ledger operations.

use crate::ids::IdError;
use crate::Role;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur in ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The requested amount is not positive.
    #[error("invalid amount: {amount_units} units")]
    InvalidAmount {
        /// The rejected amount in units.
        amount_units: i64,
    },

    /// The available balance does not cover the requested debit.
    #[error("insufficient funds: available={available}, required={required}")]
    InsufficientFunds {
        /// Current available balance in units.
        available: i64,
        /// Required amount in units.
        required: i64,
    },

    /// The destination account does not exist or is the caller itself.
    #[error("invalid recipient: {account_id}")]
    InvalidRecipient {
        /// The rejected destination account.
        account_id: String,
    },

    /// The caller's role does not permit the operation.
    #[error("forbidden: role {role:?} may not mint")]
    Forbidden {
        /// The caller's role.
        role: Role,
    },

    /// Account not found.
    #[error("account not found: {account_id}")]
    AccountNotFound {
        /// The account ID that was not found.
        account_id: String,
    },

    /// Transaction not found.
    #[error("transaction not found: {transaction_id}")]
    TransactionNotFound {
        /// The transaction ID that was not found.
        transaction_id: String,
    },

    /// Account already exists.
    #[error("account already exists: {account_id}")]
    AccountAlreadyExists {
        /// The account ID that already exists.
        account_id: String,
    },

    /// A request with this idempotency key was already applied.
    #[error("duplicate request: {request_id}")]
    DuplicateRequest {
        /// The idempotency key that was duplicated.
        request_id: String,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
