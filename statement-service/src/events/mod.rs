//! Inbound event shapes.
//!
//! The transport adapter deserializes raw payloads into the tagged [`Event`]
//! envelope; the aggregation core only ever sees these already-validated
//! shapes. An unknown `event` tag or transaction type fails deserialization
//! at the boundary and never reaches the core.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TransactionType;

/// A single posted transaction against one account and currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub account_id: String,
    pub currency: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Carried for traceability only; the core does not deduplicate on it.
    pub transaction_id: String,
    pub date: DateTime<Utc>,
}

/// A full balance snapshot for one or more currencies of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEvent {
    pub id: String,
    pub customer_id: String,
    pub currencies: Vec<String>,
    #[serde(default)]
    pub balances: HashMap<String, Decimal>,
    pub date: DateTime<Utc>,
}

/// Tagged event envelope; the `event` field selects the payload shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    TransactionCreated(TransactionEvent),
    AccountCreated(AccountEvent),
    AccountUpdated(AccountEvent),
}
