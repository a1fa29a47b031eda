//! Client error types.

/// Errors that can occur when using the ledger client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Insufficient funds for the requested transfer.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current available balance in units.
        balance: i64,
        /// Required amount in units.
        required: i64,
    },

    /// A request with this idempotency key was already applied.
    #[error("duplicate request: {request_id}")]
    DuplicateRequest {
        /// The idempotency key.
        request_id: String,
    },

    /// The caller's role does not permit the operation.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Error message from the server.
        message: String,
    },

    /// Account not found.
    #[error("account not found: {account_id}")]
    AccountNotFound {
        /// The account ID.
        account_id: String,
    },
}
