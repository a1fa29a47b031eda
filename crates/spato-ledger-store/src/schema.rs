//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Account records, keyed by `account_id`.
    pub const ACCOUNTS: &str = "accounts";

    /// Balance records, keyed by `account_id`. One row per account;
    /// only `available` and `locked` are stored, never the total.
    pub const BALANCES: &str = "balances";

    /// Ledger transactions, keyed by `transaction_id` (ULID).
    pub const TRANSACTIONS: &str = "transactions";

    /// Index: transactions by account, keyed by
    /// `account_id || transaction_id`. Value is empty (index only).
    /// A transfer is indexed under both its source and its destination.
    pub const TRANSACTIONS_BY_ACCOUNT: &str = "transactions_by_account";

    /// Applied idempotency keys, keyed by `request_id`.
    pub const REQUESTS: &str = "requests";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::ACCOUNTS,
        cf::BALANCES,
        cf::TRANSACTIONS,
        cf::TRANSACTIONS_BY_ACCOUNT,
        cf::REQUESTS,
    ]
}
