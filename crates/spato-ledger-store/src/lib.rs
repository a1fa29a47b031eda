//! `RocksDB` storage layer for the Spato CAT ledger.
//!
//! This crate provides persistent storage for accounts, balances, and
//! ledger transactions using `RocksDB` with column families.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `accounts`: Account records, keyed by `account_id`
//! - `balances`: Balance records, keyed by `account_id` (total is never stored)
//! - `transactions`: Ledger transactions, keyed by `transaction_id` (ULID)
//! - `transactions_by_account`: Index for listing transactions by account,
//!   written for both the source and the destination of a transfer
//! - `requests`: Applied idempotency keys
//!
//! Balance mutations are serialized by a store-wide write lock and applied
//! together with their transaction record in a single `WriteBatch`, so a
//! transfer either fully happens or leaves no trace.
//!
//! # Example
//!
//! ```no_run
//! use spato_ledger_store::{RocksStore, Store};
//! use spato_ledger_core::{Account, AccountId, Role};
//!
//! let store = RocksStore::open("/tmp/spato-ledger-db").unwrap();
//!
//! // Register an account; a zero balance is seeded alongside it
//! let account_id = AccountId::generate();
//! let account = Account::new(account_id, Role::Company, "Acme Syndicate".into());
//! store.create_account(&account).unwrap();
//!
//! let balance = store.get_balance(&account_id).unwrap();
//! assert_eq!(balance.total_units(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use spato_ledger_core::{Account, AccountId, Balance, BalanceKind, LedgerTransaction, TransactionId};

/// The storage trait defining all ledger persistence operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Insert a new account record and seed its zero balance atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the account is already
    /// registered, or an error if the database operation fails.
    fn create_account(&self, account: &Account) -> Result<()>;

    /// Get an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>>;

    // =========================================================================
    // Balance Operations
    // =========================================================================

    /// Get the balance record for an account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account has no balance
    /// record.
    fn get_balance(&self, account_id: &AccountId) -> Result<Balance>;

    /// Apply a signed delta to one balance field atomically.
    ///
    /// The read-modify-write runs under the store's balance lock so
    /// concurrent adjustments of the same account cannot observe the
    /// same pre-mutation value. Returns the balance after the update.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the account has no balance record.
    /// - `StoreError::InsufficientFunds` if a negative delta would drive
    ///   the field below zero.
    fn adjust_balance(
        &self,
        account_id: &AccountId,
        delta_units: i64,
        kind: BalanceKind,
    ) -> Result<Balance>;

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    /// Insert a ledger transaction.
    ///
    /// This also maintains the by-account index for every account the
    /// transaction references.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_transaction(&self, transaction: &LedgerTransaction) -> Result<()>;

    /// Get a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_transaction(&self, transaction_id: &TransactionId)
        -> Result<Option<LedgerTransaction>>;

    /// List transactions where the account is source or destination,
    /// newest first.
    ///
    /// Produces a finite snapshot bounded by `limit`, not a live
    /// subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_transactions_for_account(
        &self,
        account_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LedgerTransaction>>;

    // =========================================================================
    // Idempotency Operations
    // =========================================================================

    /// Check if a request ID has already been applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn has_request(&self, request_id: &str) -> Result<bool>;

    // =========================================================================
    // Compound Operations
    // =========================================================================

    /// Move `amount_units` of available balance from one account to
    /// another and record the transaction, all in one atomic unit.
    ///
    /// Returns the source account's balance after the debit.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if either balance record is missing.
    /// - `StoreError::InsufficientFunds` if the source's available
    ///   balance is below `amount_units`.
    /// - `StoreError::DuplicateRequest` if `request_id` was already
    ///   applied.
    fn apply_transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount_units: i64,
        transaction: &LedgerTransaction,
        request_id: Option<&str>,
    ) -> Result<Balance>;

    /// Credit `amount_units` of newly created value to an account and
    /// record the transaction, all in one atomic unit. No other account
    /// is debited.
    ///
    /// Returns the account's balance after the credit.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the balance record is missing.
    /// - `StoreError::DuplicateRequest` if `request_id` was already
    ///   applied.
    fn apply_mint(
        &self,
        account_id: &AccountId,
        amount_units: i64,
        transaction: &LedgerTransaction,
        request_id: Option<&str>,
    ) -> Result<Balance>;
}
