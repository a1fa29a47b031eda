//! The ledger service object.
//!
//! `Ledger` is the only entry point that combines balance mutation and
//! transaction recording into financially-meaningful operations. It is
//! constructed once and held in [`AppState`](crate::AppState); handlers
//! call into it rather than touching the store directly for anything
//! that moves value.

use std::sync::Arc;

use spato_ledger_core::{
    Account, AccountId, Balance, LedgerError, LedgerTransaction,
};
use spato_ledger_store::{RocksStore, Store};

/// The ledger service.
///
/// All validation happens before any mutation; the store's compound
/// operations make the apply phase a single atomic unit.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<RocksStore>,
}

impl Ledger {
    /// Create a new ledger service over the given store.
    #[must_use]
    pub fn new(store: Arc<RocksStore>) -> Self {
        Self { store }
    }

    /// Move tokens from the caller to another account.
    ///
    /// Validates the amount and the recipient (which must exist and
    /// must not be the caller); the caller's available funds are
    /// checked inside the store, under the balance lock. On success
    /// exactly one completed `Transfer` record exists referencing both
    /// accounts.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidAmount` if `amount_units <= 0`.
    /// - `LedgerError::InvalidRecipient` for a self-transfer or an
    ///   unknown destination.
    /// - `LedgerError::InsufficientFunds` if the caller's available
    ///   balance is below `amount_units`.
    /// - `LedgerError::DuplicateRequest` if `request_id` was already
    ///   applied.
    pub fn transfer(
        &self,
        caller: &Account,
        to: &AccountId,
        amount_units: i64,
        description: String,
        request_id: Option<&str>,
    ) -> Result<(LedgerTransaction, Balance), LedgerError> {
        if amount_units <= 0 {
            return Err(LedgerError::InvalidAmount { amount_units });
        }
        if *to == caller.account_id {
            return Err(LedgerError::InvalidRecipient {
                account_id: to.to_string(),
            });
        }
        if self.store.get_account(to)?.is_none() {
            return Err(LedgerError::InvalidRecipient {
                account_id: to.to_string(),
            });
        }

        let transaction =
            LedgerTransaction::transfer(caller.account_id, *to, amount_units, description);
        let balance = self.store.apply_transfer(
            &caller.account_id,
            to,
            amount_units,
            &transaction,
            request_id,
        )?;

        tracing::info!(
            from = %caller.account_id,
            to = %to,
            amount_units = %amount_units,
            transaction_id = %transaction.id,
            "Transfer applied"
        );

        Ok((transaction, balance))
    }

    /// Mint new tokens into the caller's account.
    ///
    /// The single authority boundary for minting lives here: any
    /// role-based rendering in a front-end is an optimization only.
    /// Mint creates value rather than moving it; no other account is
    /// debited.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Forbidden` unless the caller's role may mint.
    /// - `LedgerError::InvalidAmount` if `amount_units <= 0`.
    /// - `LedgerError::DuplicateRequest` if `request_id` was already
    ///   applied.
    pub fn mint(
        &self,
        caller: &Account,
        amount_units: i64,
        description: String,
        request_id: Option<&str>,
    ) -> Result<(LedgerTransaction, Balance), LedgerError> {
        if !caller.role.can_mint() {
            return Err(LedgerError::Forbidden { role: caller.role });
        }
        if amount_units <= 0 {
            return Err(LedgerError::InvalidAmount { amount_units });
        }

        let transaction = LedgerTransaction::mint(caller.account_id, amount_units, description);
        let balance =
            self.store
                .apply_mint(&caller.account_id, amount_units, &transaction, request_id)?;

        tracing::info!(
            account_id = %caller.account_id,
            amount_units = %amount_units,
            transaction_id = %transaction.id,
            "Mint applied"
        );

        Ok((transaction, balance))
    }

    /// Get the current balance of an account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if the account has no
    /// balance record.
    pub fn balance(&self, account_id: &AccountId) -> Result<Balance, LedgerError> {
        Ok(self.store.get_balance(account_id)?)
    }

    /// List transactions where the account is source or destination,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    pub fn transactions(
        &self,
        account_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LedgerTransaction>, LedgerError> {
        Ok(self
            .store
            .list_transactions_for_account(account_id, limit, offset)?)
    }
}
