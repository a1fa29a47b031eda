//! Account registration handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use spato_ledger_core::{Account, Role};
use spato_ledger_store::Store;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::state::AppState;

/// Account response.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub account_id: String,
    /// The participant's role.
    pub role: Role,
    /// Display name of the organization.
    pub organization_name: String,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id.to_string(),
            role: account.role,
            organization_name: account.organization_name.clone(),
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// Register account request.
#[derive(Debug, Deserialize)]
pub struct RegisterAccountRequest {
    /// The participant's role, fixed at creation.
    pub role: Role,
    /// Display name of the organization.
    pub organization_name: String,
}

/// Register the caller's account. A zero balance is seeded with it.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<RegisterAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    if body.organization_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Organization name must not be empty".into(),
        ));
    }

    let account = Account::new(
        auth.account_id,
        body.role,
        body.organization_name.trim().to_string(),
    );
    state.store.create_account(&account)?;

    tracing::info!(
        account_id = %auth.account_id,
        role = ?body.role,
        "Account registered"
    );

    Ok(Json(AccountResponse::from(&account)))
}

/// Get the current caller's account.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .store
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;

    Ok(Json(AccountResponse::from(&account)))
}
