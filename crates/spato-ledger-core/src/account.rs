//! Account types for the ledger.
//!
//! An account represents one participant on the platform: a bank, a
//! syndicate company, or a vendor. The role is fixed at creation and
//! determines which ledger operations the account may invoke.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// The role of a participant.
///
/// Only `Bank` accounts may mint new tokens. Transfers are open to all
/// roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A lending bank. The only role permitted to mint.
    Bank,

    /// A syndicate company drawing on its credit line.
    Company,

    /// A vendor receiving token payments.
    Vendor,
}

impl Role {
    /// Whether this role may invoke the mint operation.
    #[must_use]
    pub const fn can_mint(&self) -> bool {
        matches!(self, Self::Bank)
    }
}

/// A ledger account for one participant.
///
/// The account carries identity only; the mutable financial state lives
/// in a separate [`Balance`](crate::Balance) record keyed by the same ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The account ID (from the identity provider).
    pub account_id: AccountId,

    /// The participant's role, fixed at creation.
    pub role: Role,

    /// Display name of the organization behind the account.
    pub organization_name: String,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account.
    #[must_use]
    pub fn new(account_id: AccountId, role: Role, organization_name: String) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            role,
            organization_name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bank_can_mint() {
        assert!(Role::Bank.can_mint());
        assert!(!Role::Company.can_mint());
        assert!(!Role::Vendor.can_mint());
    }

    #[test]
    fn role_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Bank).unwrap(), "\"bank\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"vendor\"").unwrap(),
            Role::Vendor
        );
    }

    #[test]
    fn new_account_carries_role() {
        let id = AccountId::generate();
        let account = Account::new(id, Role::Company, "Acme Syndicate".into());
        assert_eq!(account.account_id, id);
        assert_eq!(account.role, Role::Company);
        assert_eq!(account.organization_name, "Acme Syndicate");
    }
}
