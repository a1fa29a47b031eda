//! Transaction types for the ledger.
//!
//! Every balance-affecting event is recorded as an immutable
//! `LedgerTransaction`. Records are never updated after completion and
//! never deleted; they form the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, TransactionId};

/// An immutable record of one balance-affecting event.
///
/// Transactions use ULIDs for time-ordered IDs. A `Transfer` references
/// both a source and a destination account; a `Mint` has no source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Unique transaction ID (ULID for time-ordering).
    pub id: TransactionId,

    /// What kind of event this record represents.
    pub kind: TransactionKind,

    /// Amount moved, in units. Always positive.
    pub amount_units: i64,

    /// The account debited. Absent for `Mint`.
    pub from_account: Option<AccountId>,

    /// The account credited. Absent for `Burn` and pure redemption.
    pub to_account: Option<AccountId>,

    /// Where the record is in its lifecycle.
    pub status: TransactionStatus,

    /// Human-readable description.
    pub description: String,

    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
}

impl LedgerTransaction {
    /// Create a completed transfer record between two accounts.
    #[must_use]
    pub fn transfer(
        from: AccountId,
        to: AccountId,
        amount_units: i64,
        description: String,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            kind: TransactionKind::Transfer,
            amount_units,
            from_account: Some(from),
            to_account: Some(to),
            status: TransactionStatus::Completed,
            description,
            created_at: Utc::now(),
        }
    }

    /// Create a completed mint record crediting `to` with newly created
    /// value. Mint has no source account.
    #[must_use]
    pub fn mint(to: AccountId, amount_units: i64, description: String) -> Self {
        Self {
            id: TransactionId::generate(),
            kind: TransactionKind::Mint,
            amount_units,
            from_account: None,
            to_account: Some(to),
            status: TransactionStatus::Completed,
            description,
            created_at: Utc::now(),
        }
    }

    /// Whether this record touches the given account as source or
    /// destination.
    #[must_use]
    pub fn involves(&self, account_id: &AccountId) -> bool {
        self.from_account.as_ref() == Some(account_id)
            || self.to_account.as_ref() == Some(account_id)
    }
}

/// Kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Tokens moved from one account to another.
    Transfer,

    /// The destination-side rendering of a transfer. Never stored; a
    /// transfer is written once and shown as `Receive` to its
    /// destination account.
    Receive,

    /// New tokens created by a bank, with no source account.
    Mint,

    /// Tokens destroyed, with no destination account.
    Burn,

    /// Tokens redeemed by a vendor against the issuing bank.
    Redeem,
}

impl TransactionKind {
    /// Check if this kind debits a source account.
    #[must_use]
    pub const fn debits_source(&self) -> bool {
        matches!(self, Self::Transfer | Self::Burn | Self::Redeem)
    }

    /// Check if this kind credits a destination account.
    #[must_use]
    pub const fn credits_destination(&self) -> bool {
        matches!(self, Self::Transfer | Self::Receive | Self::Mint)
    }
}

/// Lifecycle status of a transaction record.
///
/// The only permitted change is the initial `Pending` to
/// `Completed`/`Failed` move; completed records are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Recorded but not yet applied.
    Pending,

    /// Applied; the record is frozen.
    Completed,

    /// Rejected during application.
    Failed,
}
