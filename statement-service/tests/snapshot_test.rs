mod common;

use axum::http::StatusCode;
use common::TestApp;
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn account_created_snapshot_creates_all_ledgers() {
    let app = TestApp::spawn().await;

    let response = app
        .post_event(json!({
            "event": "AccountCreated",
            "id": "A1",
            "customer_id": "cust789",
            "currencies": ["USD", "EUR"],
            "balances": { "USD": 1000, "EUR": 2000 },
            "date": "2024-08-28T12:00:00Z"
        }))
        .await;
    assert_eq!(StatusCode::ACCEPTED, response.status());

    let stored = app
        .find_stored_statement("A1", 2024, 8)
        .await
        .expect("Statement not found in DB");
    assert_eq!(stored.currencies.len(), 2);

    let usd = stored.ledger("USD").expect("USD ledger missing");
    assert_eq!(usd.closing_balance, Decimal::from(1000));
    assert!(usd.transactions.is_empty());

    let eur = stored.ledger("EUR").expect("EUR ledger missing");
    assert_eq!(eur.closing_balance, Decimal::from(2000));
    assert!(eur.transactions.is_empty());

    app.cleanup().await;
}

#[tokio::test]
async fn snapshot_overwrites_balance_without_appending_history() {
    let app = TestApp::spawn().await;

    app.post_event(json!({
        "event": "TransactionCreated",
        "account_id": "A1",
        "currency": "USD",
        "amount": 100,
        "type": "INBOUND",
        "transaction_id": "tx-1",
        "date": "2024-08-05T00:00:00Z"
    }))
    .await;

    let response = app
        .post_event(json!({
            "event": "AccountUpdated",
            "id": "A1",
            "customer_id": "cust789",
            "currencies": ["USD"],
            "balances": { "USD": 500 },
            "date": "2024-08-28T12:00:00Z"
        }))
        .await;
    assert_eq!(StatusCode::ACCEPTED, response.status());

    let stored = app
        .find_stored_statement("A1", 2024, 8)
        .await
        .expect("Statement not found in DB");
    let usd = stored.ledger("USD").expect("USD ledger missing");
    // Balance reflects the snapshot, history keeps only the transaction
    assert_eq!(usd.closing_balance, Decimal::from(500));
    assert_eq!(usd.transactions.len(), 1);

    app.cleanup().await;
}

#[tokio::test]
async fn snapshot_currency_without_balance_defaults_to_zero() {
    let app = TestApp::spawn().await;

    app.post_event(json!({
        "event": "AccountUpdated",
        "id": "A1",
        "customer_id": "cust789",
        "currencies": ["USD", "EUR"],
        "balances": { "USD": 1000 },
        "date": "2024-08-28T12:00:00Z"
    }))
    .await;

    let stored = app
        .find_stored_statement("A1", 2024, 8)
        .await
        .expect("Statement not found in DB");
    assert_eq!(
        stored.ledger("EUR").expect("EUR ledger missing").closing_balance,
        Decimal::ZERO
    );

    app.cleanup().await;
}

#[tokio::test]
async fn duplicate_currency_codes_in_snapshot_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_event(json!({
            "event": "AccountUpdated",
            "id": "A1",
            "customer_id": "cust789",
            "currencies": ["USD", "USD"],
            "balances": { "USD": 1000 },
            "date": "2024-08-28T12:00:00Z"
        }))
        .await;
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    // Fail-fast: nothing was persisted
    assert!(app.find_stored_statement("A1", 2024, 8).await.is_none());

    app.cleanup().await;
}
