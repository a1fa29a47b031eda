//! Core types and utilities for the Spato CAT ledger.
//!
//! This crate provides the foundational types used throughout the ledger:
//!
//! - **Identifiers**: `AccountId`, `TransactionId`
//! - **Accounts**: `Account`, `Role`
//! - **Balances**: `Balance`, `BalanceKind`
//! - **Transactions**: `LedgerTransaction`, `TransactionKind`, `TransactionStatus`
//!
//! # CAT Unit
//!
//! **1 CAT (Credit Access Token) = 100 units**
//!
//! - A bank mints 5,000 CAT → 500,000 units enter circulation
//! - A company transfers 300 CAT → 30,000 units move between accounts
//! - Stored as `i64` (integer units) to avoid floating point precision issues

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod balance;
pub mod error;
pub mod ids;
pub mod transaction;

pub use account::{Account, Role};
pub use balance::{format_units, Balance, BalanceKind, UNITS_PER_TOKEN};
pub use error::{LedgerError, Result};
pub use ids::{AccountId, IdError, TransactionId};
pub use transaction::{LedgerTransaction, TransactionKind, TransactionStatus};
