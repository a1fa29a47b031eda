//! Spato Ledger HTTP API Service.
//!
//! This crate provides the HTTP API for the CAT ledger, including:
//!
//! - Account registration (bank, company, vendor)
//! - Balance reads and transaction history
//! - Transfers between accounts
//! - Bank-only minting
//!
//! # Authentication
//!
//! Requests carry a bearer token that establishes the caller's account
//! identity. When `AUTH_SECRET` is configured, tokens are validated as
//! HS256 JWTs; otherwise a dev token format is accepted. The caller's
//! role is always read from the account record, never from the token.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers must be async even though the store is synchronous

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use ledger::Ledger;
pub use routes::create_router;
pub use state::AppState;
