//! Spato Ledger Client SDK.
//!
//! This crate provides a client library for front-ends and services to
//! interact with the CAT ledger API.
//!
//! # Example
//!
//! ```no_run
//! use spato_ledger_client::{SpatoLedgerClient, TransferRequest};
//!
//! # async fn example() -> Result<(), spato_ledger_client::ClientError> {
//! let client = SpatoLedgerClient::new(
//!     "http://spato-ledger.finance.svc:8080",
//!     "bearer-token-for-this-account",
//! );
//!
//! // Move 300 CAT (30,000 units) to a vendor
//! let response = client.transfer(TransferRequest {
//!     to_account_id: "vendor-account-uuid".to_string(),
//!     amount_units: 30_000,
//!     description: Some("Invoice 1042".to_string()),
//!     request_id: Some("req-1042".to_string()),
//! }).await?;
//!
//! println!("Remaining: {} units", response.balance.available_units);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, SpatoLedgerClient};
pub use error::ClientError;
pub use types::*;
