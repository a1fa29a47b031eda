//! Authentication extractor.
//!
//! This module provides the `AuthAccount` extractor, which establishes
//! the caller's account identity from a bearer token. The ledger never
//! authenticates credentials itself; the token only names the account.
//! Roles are read from the account record by the handlers.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use spato_ledger_core::AccountId;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated account extracted from a bearer token.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// The account ID.
    pub account_id: AccountId,
}

impl FromRequestParts<Arc<AppState>> for AuthAccount {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Extract the Bearer token
            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            // With a configured secret, tokens are HS256 JWTs whose
            // `sub` claim names the account.
            if let Some(secret) = &state.config.auth_secret {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.set_audience(&[state.config.auth_audience.clone()]);

                let token_data = jsonwebtoken::decode::<JwtClaims>(
                    token,
                    &DecodingKey::from_secret(secret.as_bytes()),
                    &validation,
                )
                .map_err(|_| ApiError::Unauthorized)?;

                let account_id = token_data
                    .claims
                    .sub
                    .parse::<AccountId>()
                    .map_err(|_| ApiError::Unauthorized)?;

                return Ok(AuthAccount { account_id });
            }

            // Dev mode: "dev-token:<account-uuid>"
            if let Some(account_id_str) = token.strip_prefix("dev-token:") {
                let account_id = account_id_str
                    .parse::<AccountId>()
                    .map_err(|_| ApiError::Unauthorized)?;

                return Ok(AuthAccount { account_id });
            }

            Err(ApiError::Unauthorized)
        })
    }
}

/// JWT claims structure for platform identity tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (account ID).
    pub sub: String,
    /// Audience.
    pub aud: String,
    /// Issuer.
    pub iss: Option<String>,
    /// Expiration time.
    pub exp: i64,
    /// Issued at.
    pub iat: Option<i64>,
}
