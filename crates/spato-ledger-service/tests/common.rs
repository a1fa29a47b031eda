//! Common test utilities for ledger integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use spato_ledger_core::{AccountId, BalanceKind, Role};
use spato_ledger_service::{create_router, AppState, ServiceConfig};
use spato_ledger_store::{RocksStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct handle on the store, for seeding balances.
    pub store: Arc<RocksStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            auth_secret: None,
            auth_audience: "spato-ledger".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Get the authorization header for an account.
    pub fn auth_header(account_id: &AccountId) -> String {
        format!("Bearer dev-token:{account_id}")
    }

    /// Register a fresh account through the API and return its ID.
    pub async fn register(&self, role: Role, organization_name: &str) -> AccountId {
        let account_id = AccountId::generate();

        self.server
            .post("/v1/accounts")
            .add_header("authorization", Self::auth_header(&account_id))
            .json(&json!({
                "role": role,
                "organization_name": organization_name
            }))
            .await
            .assert_status_ok();

        account_id
    }

    /// Seed an account's available balance directly through the store.
    pub fn seed(&self, account_id: &AccountId, units: i64) {
        self.store
            .adjust_balance(account_id, units, BalanceKind::Available)
            .expect("Failed to seed balance");
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
