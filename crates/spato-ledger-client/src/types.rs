//! Request and response types for the ledger client.

use serde::{Deserialize, Serialize};

use spato_ledger_core::{Role, TransactionKind, TransactionStatus};

/// Register account request.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterAccountRequest {
    /// The participant's role, fixed at creation.
    pub role: Role,
    /// Display name of the organization.
    pub organization_name: String,
}

/// Account response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub account_id: String,
    /// The participant's role.
    pub role: Role,
    /// Display name of the organization.
    pub organization_name: String,
    /// Created timestamp (RFC 3339).
    pub created_at: String,
}

/// Balance response.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    /// Spendable units.
    pub available_units: i64,
    /// Reserved units.
    pub locked_units: i64,
    /// Derived total (`available + locked`).
    pub total_units: i64,
    /// Total formatted as CAT, e.g. `"300.00"`.
    pub total_formatted: String,
}

/// One transaction history row.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// Kind as seen by the requesting account.
    pub kind: TransactionKind,
    /// Amount moved, in units.
    pub amount_units: i64,
    /// Organization name of the source account, if any.
    pub from_name: Option<String>,
    /// Organization name of the destination account, if any.
    pub to_name: Option<String>,
    /// Record status.
    pub status: TransactionStatus,
    /// Description.
    pub description: String,
    /// Timestamp (RFC 3339).
    pub created_at: String,
}

/// List transactions response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListTransactionsResponse {
    /// Transactions (newest first).
    pub transactions: Vec<TransactionResponse>,
    /// Whether there are more transactions.
    pub has_more: bool,
}

/// Transfer request.
#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    /// Destination account ID.
    pub to_account_id: String,
    /// Amount to move, in units. Must be positive.
    pub amount_units: i64,
    /// Optional description for the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional idempotency key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Transfer response.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferResponse {
    /// The recorded transaction ID.
    pub transaction_id: String,
    /// The caller's balance after the debit.
    pub balance: BalanceResponse,
}

/// Mint request.
#[derive(Debug, Clone, Serialize)]
pub struct MintRequest {
    /// Amount to create, in units. Must be positive.
    pub amount_units: i64,
    /// Optional description for the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional idempotency key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Mint response.
#[derive(Debug, Clone, Deserialize)]
pub struct MintResponse {
    /// The recorded transaction ID.
    pub transaction_id: String,
    /// The caller's balance after the credit.
    pub balance: BalanceResponse,
}

/// Error response envelope returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error body.
    pub error: ApiErrorBody,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
