//! Ledger operation integration tests: balances, transfers, minting,
//! and transaction history.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use spato_ledger_core::{AccountId, Role};

// ============================================================================
// Balance
// ============================================================================

#[tokio::test]
async fn balance_is_zero_after_registration() {
    let harness = TestHarness::new();
    let account_id = harness.register(Role::Company, "Acme Syndicate").await;

    let response = harness
        .server
        .get("/v1/ledger/balance")
        .add_header("authorization", TestHarness::auth_header(&account_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["available_units"], 0);
    assert_eq!(body["locked_units"], 0);
    assert_eq!(body["total_units"], 0);
    assert_eq!(body["total_formatted"], "0.00");
}

#[tokio::test]
async fn balance_without_account_fails() {
    let harness = TestHarness::new();
    let account_id = AccountId::generate();

    let response = harness
        .server
        .get("/v1/ledger/balance")
        .add_header("authorization", TestHarness::auth_header(&account_id))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn balance_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/ledger/balance").await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Transfer
// ============================================================================

#[tokio::test]
async fn transfer_moves_funds_and_records_once() {
    let harness = TestHarness::new();
    let x = harness.register(Role::Company, "Acme Syndicate").await;
    let y = harness.register(Role::Vendor, "Parts & Co").await;
    harness.seed(&x, 100_000);

    let response = harness
        .server
        .post("/v1/ledger/transfer")
        .add_header("authorization", TestHarness::auth_header(&x))
        .json(&json!({
            "to_account_id": y.to_string(),
            "amount_units": 30_000,
            "description": "Invoice 1042"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"]["available_units"], 70_000);

    // Destination sees the credit
    let response = harness
        .server
        .get("/v1/ledger/balance")
        .add_header("authorization", TestHarness::auth_header(&y))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["available_units"], 30_000);

    // The source sees one transfer row
    let response = harness
        .server
        .get("/v1/ledger/transactions")
        .add_header("authorization", TestHarness::auth_header(&x))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let rows = body["transactions"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"], "transfer");
    assert_eq!(rows[0]["amount_units"], 30_000);
    assert_eq!(rows[0]["from_name"], "Acme Syndicate");
    assert_eq!(rows[0]["to_name"], "Parts & Co");
    assert_eq!(rows[0]["status"], "completed");
    assert_eq!(rows[0]["description"], "Invoice 1042");

    // The destination sees the same record, rendered as a receive
    let response = harness
        .server
        .get("/v1/ledger/transactions")
        .add_header("authorization", TestHarness::auth_header(&y))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let rows = body["transactions"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"], "receive");
    assert_eq!(rows[0]["from_name"], "Acme Syndicate");
}

#[tokio::test]
async fn transfer_insufficient_funds_mutates_nothing() {
    let harness = TestHarness::new();
    let x = harness.register(Role::Company, "Acme Syndicate").await;
    let y = harness.register(Role::Vendor, "Parts & Co").await;
    harness.seed(&x, 10_000);

    let response = harness
        .server
        .post("/v1/ledger/transfer")
        .add_header("authorization", TestHarness::auth_header(&x))
        .json(&json!({
            "to_account_id": y.to_string(),
            "amount_units": 15_000
        }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_funds");
    assert_eq!(body["error"]["details"]["balance"], 10_000);
    assert_eq!(body["error"]["details"]["required"], 15_000);

    // No partial mutation, no record
    let response = harness
        .server
        .get("/v1/ledger/balance")
        .add_header("authorization", TestHarness::auth_header(&x))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["available_units"], 10_000);

    let response = harness
        .server
        .get("/v1/ledger/transactions")
        .add_header("authorization", TestHarness::auth_header(&x))
        .await;
    let body: serde_json::Value = response.json();
    assert!(body["transactions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn self_transfer_is_rejected() {
    let harness = TestHarness::new();
    let x = harness.register(Role::Company, "Acme Syndicate").await;
    harness.seed(&x, 10_000);

    let response = harness
        .server
        .post("/v1/ledger/transfer")
        .add_header("authorization", TestHarness::auth_header(&x))
        .json(&json!({
            "to_account_id": x.to_string(),
            "amount_units": 5_000
        }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");

    let response = harness
        .server
        .get("/v1/ledger/balance")
        .add_header("authorization", TestHarness::auth_header(&x))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["available_units"], 10_000);
}

#[tokio::test]
async fn transfer_to_unknown_recipient_is_rejected() {
    let harness = TestHarness::new();
    let x = harness.register(Role::Company, "Acme Syndicate").await;
    harness.seed(&x, 10_000);

    let response = harness
        .server
        .post("/v1/ledger/transfer")
        .add_header("authorization", TestHarness::auth_header(&x))
        .json(&json!({
            "to_account_id": AccountId::generate().to_string(),
            "amount_units": 5_000
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn transfer_rejects_non_positive_amounts() {
    let harness = TestHarness::new();
    let x = harness.register(Role::Company, "Acme Syndicate").await;
    let y = harness.register(Role::Vendor, "Parts & Co").await;
    harness.seed(&x, 10_000);

    for amount in [0, -500] {
        let response = harness
            .server
            .post("/v1/ledger/transfer")
            .add_header("authorization", TestHarness::auth_header(&x))
            .json(&json!({
                "to_account_id": y.to_string(),
                "amount_units": amount
            }))
            .await;

        response.assert_status_bad_request();
    }
}

// ============================================================================
// Mint
// ============================================================================

#[tokio::test]
async fn mint_credits_bank_account() {
    let harness = TestHarness::new();
    let bank = harness.register(Role::Bank, "First Syndicate Bank").await;

    let response = harness
        .server
        .post("/v1/ledger/mint")
        .add_header("authorization", TestHarness::auth_header(&bank))
        .json(&json!({
            "amount_units": 500_000,
            "description": "Quarterly issuance"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"]["available_units"], 500_000);

    // One mint record with no source
    let response = harness
        .server
        .get("/v1/ledger/transactions")
        .add_header("authorization", TestHarness::auth_header(&bank))
        .await;
    let body: serde_json::Value = response.json();
    let rows = body["transactions"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"], "mint");
    assert_eq!(rows[0]["amount_units"], 500_000);
    assert!(rows[0]["from_name"].is_null());
    assert_eq!(rows[0]["to_name"], "First Syndicate Bank");
}

#[tokio::test]
async fn mint_by_non_bank_is_forbidden() {
    let harness = TestHarness::new();
    let company = harness.register(Role::Company, "Acme Syndicate").await;

    let response = harness
        .server
        .post("/v1/ledger/mint")
        .add_header("authorization", TestHarness::auth_header(&company))
        .json(&json!({ "amount_units": 5_000 }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "forbidden");

    // No balance change and no transaction record
    let response = harness
        .server
        .get("/v1/ledger/balance")
        .add_header("authorization", TestHarness::auth_header(&company))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_units"], 0);

    let response = harness
        .server
        .get("/v1/ledger/transactions")
        .add_header("authorization", TestHarness::auth_header(&company))
        .await;
    let body: serde_json::Value = response.json();
    assert!(body["transactions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn mint_rejects_non_positive_amounts() {
    let harness = TestHarness::new();
    let bank = harness.register(Role::Bank, "First Syndicate Bank").await;

    let response = harness
        .server
        .post("/v1/ledger/mint")
        .add_header("authorization", TestHarness::auth_header(&bank))
        .json(&json!({ "amount_units": 0 }))
        .await;

    response.assert_status_bad_request();
}

// ============================================================================
// Idempotency
// ============================================================================

#[tokio::test]
async fn duplicate_request_id_is_rejected() {
    let harness = TestHarness::new();
    let x = harness.register(Role::Company, "Acme Syndicate").await;
    let y = harness.register(Role::Vendor, "Parts & Co").await;
    harness.seed(&x, 100_000);

    let request = json!({
        "to_account_id": y.to_string(),
        "amount_units": 30_000,
        "request_id": "req-1042"
    });

    harness
        .server
        .post("/v1/ledger/transfer")
        .add_header("authorization", TestHarness::auth_header(&x))
        .json(&request)
        .await
        .assert_status_ok();

    // A blind retry must not double-apply
    let response = harness
        .server
        .post("/v1/ledger/transfer")
        .add_header("authorization", TestHarness::auth_header(&x))
        .json(&request)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "duplicate_request");

    let response = harness
        .server
        .get("/v1/ledger/balance")
        .add_header("authorization", TestHarness::auth_header(&x))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["available_units"], 70_000);
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn transactions_newest_first_with_has_more() {
    let harness = TestHarness::new();
    let bank = harness.register(Role::Bank, "First Syndicate Bank").await;

    for (amount, description) in [(100, "first"), (200, "second"), (300, "third")] {
        harness
            .server
            .post("/v1/ledger/mint")
            .add_header("authorization", TestHarness::auth_header(&bank))
            .json(&json!({
                "amount_units": amount,
                "description": description
            }))
            .await
            .assert_status_ok();

        // ULIDs are generated at creation time; keep the order stable
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let response = harness
        .server
        .get("/v1/ledger/transactions?limit=2")
        .add_header("authorization", TestHarness::auth_header(&bank))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let rows = body["transactions"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["description"], "third");
    assert_eq!(rows[1]["description"], "second");
    assert_eq!(body["has_more"], true);

    let response = harness
        .server
        .get("/v1/ledger/transactions?limit=2&offset=2")
        .add_header("authorization", TestHarness::auth_header(&bank))
        .await;

    let body: serde_json::Value = response.json();
    let rows = body["transactions"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["description"], "first");
    assert_eq!(body["has_more"], false);
}

// ============================================================================
// Conservation
// ============================================================================

#[tokio::test]
async fn transfers_conserve_minted_supply() {
    let harness = TestHarness::new();
    let bank = harness.register(Role::Bank, "First Syndicate Bank").await;
    let company = harness.register(Role::Company, "Acme Syndicate").await;
    let vendor = harness.register(Role::Vendor, "Parts & Co").await;

    harness
        .server
        .post("/v1/ledger/mint")
        .add_header("authorization", TestHarness::auth_header(&bank))
        .json(&json!({ "amount_units": 100_000 }))
        .await
        .assert_status_ok();

    for (from, to, amount) in [(bank, company, 40_000), (company, vendor, 10_000)] {
        harness
            .server
            .post("/v1/ledger/transfer")
            .add_header("authorization", TestHarness::auth_header(&from))
            .json(&json!({
                "to_account_id": to.to_string(),
                "amount_units": amount
            }))
            .await
            .assert_status_ok();
    }

    let mut total = 0;
    for account_id in [bank, company, vendor] {
        let response = harness
            .server
            .get("/v1/ledger/balance")
            .add_header("authorization", TestHarness::auth_header(&account_id))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        total += body["total_units"].as_i64().unwrap();
    }
    assert_eq!(total, 100_000);
}
