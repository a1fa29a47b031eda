//! Ledger HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    AccountResponse, ApiErrorResponse, BalanceResponse, ListTransactionsResponse, MintRequest,
    MintResponse, RegisterAccountRequest, TransferRequest, TransferResponse,
};

/// Spato ledger API client.
///
/// Each client instance acts as one account, identified by its bearer
/// token.
#[derive(Debug, Clone)]
pub struct SpatoLedgerClient {
    client: Client,
    base_url: String,
    bearer_token: String,
}

impl SpatoLedgerClient {
    /// Create a new ledger client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the ledger service (e.g., `"http://spato-ledger:8080"`)
    /// * `bearer_token` - Bearer token establishing the account identity
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self::with_options(base_url, bearer_token, ClientOptions::default())
    }

    /// Create a new ledger client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        }
    }

    /// Register the account behind this client's token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an
    /// error.
    pub async fn register_account(
        &self,
        request: RegisterAccountRequest,
    ) -> Result<AccountResponse, ClientError> {
        let url = format!("{}/v1/accounts", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the account behind this client's token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an
    /// error.
    pub async fn account(&self) -> Result<AccountResponse, ClientError> {
        let url = format!("{}/v1/accounts/me", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the account's current balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an
    /// error.
    pub async fn balance(&self) -> Result<BalanceResponse, ClientError> {
        let url = format!("{}/v1/ledger/balance", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List the account's transaction history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an
    /// error.
    pub async fn transactions(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<ListTransactionsResponse, ClientError> {
        let url = format!("{}/v1/ledger/transactions", self.base_url);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Move tokens to another account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an
    /// error.
    pub async fn transfer(&self, request: TransferRequest) -> Result<TransferResponse, ClientError> {
        let url = format!("{}/v1/ledger/transfer", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Mint new tokens into the account. Bank accounts only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an
    /// error.
    pub async fn mint(&self, request: MintRequest) -> Result<MintResponse, ClientError> {
        let url = format!("{}/v1/ledger/mint", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let message = api_error.error.message;

                tracing::debug!(
                    code = %code,
                    status = %status,
                    "Ledger API returned an error"
                );

                // Map specific error codes to typed errors
                match code {
                    "insufficient_funds" => {
                        let balance = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("balance"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);
                        let required = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("required"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);

                        Err(ClientError::InsufficientFunds { balance, required })
                    }
                    "duplicate_request" => Err(ClientError::DuplicateRequest {
                        request_id: message,
                    }),
                    "forbidden" => Err(ClientError::Forbidden { message }),
                    "not_found" if message.contains("Account") => {
                        Err(ClientError::AccountNotFound {
                            account_id: message.replace("Account not found: ", ""),
                        })
                    }
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn client_creation() {
        let client = SpatoLedgerClient::new("http://localhost:8080", "test-token");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = SpatoLedgerClient::new("http://localhost:8080/", "test-token");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn balance_fetch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ledger/balance"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "available_units": 70_000,
                "locked_units": 5_000,
                "total_units": 75_000,
                "total_formatted": "750.00"
            })))
            .mount(&server)
            .await;

        let client = SpatoLedgerClient::new(server.uri(), "test-token");
        let balance = client.balance().await.unwrap();

        assert_eq!(balance.available_units, 70_000);
        assert_eq!(balance.locked_units, 5_000);
        assert_eq!(balance.total_units, 75_000);
    }

    #[tokio::test]
    async fn insufficient_funds_is_typed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/ledger/transfer"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {
                    "code": "insufficient_funds",
                    "message": "insufficient funds: balance=100, required=150",
                    "details": { "balance": 100, "required": 150 }
                }
            })))
            .mount(&server)
            .await;

        let client = SpatoLedgerClient::new(server.uri(), "test-token");
        let result = client
            .transfer(TransferRequest {
                to_account_id: "11111111-2222-3333-4444-555555555555".to_string(),
                amount_units: 150,
                description: None,
                request_id: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(ClientError::InsufficientFunds {
                balance: 100,
                required: 150
            })
        ));
    }

    #[tokio::test]
    async fn forbidden_mint_is_typed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/ledger/mint"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": "forbidden",
                    "message": "forbidden: role Vendor may not mint"
                }
            })))
            .mount(&server)
            .await;

        let client = SpatoLedgerClient::new(server.uri(), "test-token");
        let result = client
            .mint(MintRequest {
                amount_units: 5_000,
                description: None,
                request_id: None,
            })
            .await;

        assert!(matches!(result, Err(ClientError::Forbidden { .. })));
    }
}
