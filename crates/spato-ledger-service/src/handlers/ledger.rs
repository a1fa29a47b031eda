//! Balance, transaction history, transfer, and mint handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use spato_ledger_core::{
    format_units, AccountId, Balance, LedgerTransaction, TransactionKind, TransactionStatus,
};
use spato_ledger_store::Store;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::state::AppState;

/// Balance response. The total is derived in the response; it is never
/// stored.
#[derive(Debug, Serialize)]
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

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            available_units: balance.available_units,
            locked_units: balance.locked_units,
            total_units: balance.total_units(),
            total_formatted: format_units(balance.total_units()),
        }
    }
}

/// Get the caller's current balance.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.ledger.balance(&auth.account_id)?;
    Ok(Json(BalanceResponse::from(balance)))
}

/// Transaction list query parameters.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Maximum number of transactions to return (default: 50).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// Transaction response row.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// Kind as seen by the caller: a stored transfer is rendered as
    /// `receive` when the caller is its destination.
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
    /// Timestamp.
    pub created_at: String,
}

/// List transactions response.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    /// Transactions (newest first).
    pub transactions: Vec<TransactionResponse>,
    /// Whether there are more transactions.
    pub has_more: bool,
}

/// List the caller's transaction history.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<ListTransactionsResponse>, ApiError> {
    // Verify the account exists
    state
        .store
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;

    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);
    let transactions = state
        .ledger
        .transactions(&auth.account_id, limit + 1, query.offset)?;

    let has_more = transactions.len() > limit;

    let mut names: HashMap<AccountId, String> = HashMap::new();
    let mut rows = Vec::with_capacity(limit.min(transactions.len()));
    for tx in transactions.iter().take(limit) {
        rows.push(render_transaction(&state, &mut names, &auth.account_id, tx)?);
    }

    Ok(Json(ListTransactionsResponse {
        transactions: rows,
        has_more,
    }))
}

/// Build one response row from a stored transaction, as seen by `viewer`.
fn render_transaction(
    state: &AppState,
    names: &mut HashMap<AccountId, String>,
    viewer: &AccountId,
    tx: &LedgerTransaction,
) -> Result<TransactionResponse, ApiError> {
    let kind = if tx.kind == TransactionKind::Transfer && tx.to_account.as_ref() == Some(viewer) {
        TransactionKind::Receive
    } else {
        tx.kind
    };

    let from_name = tx
        .from_account
        .map(|id| organization_name(state, names, &id))
        .transpose()?;
    let to_name = tx
        .to_account
        .map(|id| organization_name(state, names, &id))
        .transpose()?;

    Ok(TransactionResponse {
        id: tx.id.to_string(),
        kind,
        amount_units: tx.amount_units,
        from_name,
        to_name,
        status: tx.status,
        description: tx.description.clone(),
        created_at: tx.created_at.to_rfc3339(),
    })
}

/// Resolve an account's organization name, caching lookups per request.
///
/// Accounts are never deleted, so a missing record only happens for
/// foreign data; fall back to the raw ID rather than failing the page.
fn organization_name(
    state: &AppState,
    names: &mut HashMap<AccountId, String>,
    account_id: &AccountId,
) -> Result<String, ApiError> {
    if let Some(name) = names.get(account_id) {
        return Ok(name.clone());
    }

    let name = state
        .store
        .get_account(account_id)?
        .map_or_else(|| account_id.to_string(), |a| a.organization_name);
    names.insert(*account_id, name.clone());
    Ok(name)
}

/// Transfer request.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Destination account ID.
    pub to_account_id: String,
    /// Amount to move, in units. Must be positive.
    pub amount_units: i64,
    /// Optional description for the record.
    pub description: Option<String>,
    /// Optional idempotency key; a retried request with the same key is
    /// rejected instead of double-applied.
    pub request_id: Option<String>,
}

/// Transfer response.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    /// The recorded transaction ID.
    pub transaction_id: String,
    /// The caller's balance after the debit.
    pub balance: BalanceResponse,
}

/// Move tokens from the caller to another account.
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    let caller = state
        .store
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;

    let to: AccountId = body
        .to_account_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid destination account ID".into()))?;

    let description = body
        .description
        .unwrap_or_else(|| "CAT transfer".to_string());

    let (transaction, balance) = state.ledger.transfer(
        &caller,
        &to,
        body.amount_units,
        description,
        body.request_id.as_deref(),
    )?;

    Ok(Json(TransferResponse {
        transaction_id: transaction.id.to_string(),
        balance: BalanceResponse::from(balance),
    }))
}

/// Mint request.
#[derive(Debug, Deserialize)]
pub struct MintRequest {
    /// Amount to create, in units. Must be positive.
    pub amount_units: i64,
    /// Optional description for the record.
    pub description: Option<String>,
    /// Optional idempotency key.
    pub request_id: Option<String>,
}

/// Mint response.
#[derive(Debug, Serialize)]
pub struct MintResponse {
    /// The recorded transaction ID.
    pub transaction_id: String,
    /// The caller's balance after the credit.
    pub balance: BalanceResponse,
}

/// Mint new tokens into the caller's account. Bank accounts only.
pub async fn mint(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<MintRequest>,
) -> Result<Json<MintResponse>, ApiError> {
    let caller = state
        .store
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;

    let description = body
        .description
        .unwrap_or_else(|| "CAT issuance".to_string());

    let (transaction, balance) = state.ledger.mint(
        &caller,
        body.amount_units,
        description,
        body.request_id.as_deref(),
    )?;

    Ok(Json(MintResponse {
        transaction_id: transaction.id.to_string(),
        balance: BalanceResponse::from(balance),
    }))
}
