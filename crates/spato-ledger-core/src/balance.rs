//! Balance types for the ledger.
//!
//! Each account holds exactly one balance record with an available and a
//! locked field. The total is always derived from the two parts and is
//! never stored.

use serde::{Deserialize, Serialize};

/// Number of integer units in one CAT.
pub const UNITS_PER_TOKEN: i64 = 100;

/// The mutable financial state of one account.
///
/// Invariant: `available_units >= 0` and `locked_units >= 0` at all
/// times. Both fields are mutated only through the store's atomic
/// balance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Units the account may freely spend via transfer.
    pub available_units: i64,

    /// Units reserved and unavailable for spending.
    pub locked_units: i64,
}

impl Balance {
    /// A zero balance, assigned to every account at creation.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            available_units: 0,
            locked_units: 0,
        }
    }

    /// The total balance, derived as `available + locked`.
    #[must_use]
    pub const fn total_units(&self) -> i64 {
        self.available_units + self.locked_units
    }

    /// Read the field selected by `kind`.
    #[must_use]
    pub const fn get(&self, kind: BalanceKind) -> i64 {
        match kind {
            BalanceKind::Available => self.available_units,
            BalanceKind::Locked => self.locked_units,
        }
    }

    /// Write the field selected by `kind`.
    pub fn set(&mut self, kind: BalanceKind, units: i64) {
        match kind {
            BalanceKind::Available => self.available_units = units,
            BalanceKind::Locked => self.locked_units = units,
        }
    }
}

/// Selects which balance field an adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceKind {
    /// The spendable portion of the balance.
    Available,

    /// The reserved portion of the balance.
    Locked,
}

/// Format a unit amount as a human-readable CAT string, e.g. `"50.00"`.
#[must_use]
pub fn format_units(units: i64) -> String {
    let sign = if units < 0 { "-" } else { "" };
    let abs = units.abs();
    format!(
        "{sign}{}.{:02}",
        abs / UNITS_PER_TOKEN,
        abs % UNITS_PER_TOKEN
    )
}
