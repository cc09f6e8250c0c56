use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::period::Period;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Inbound,
    Outbound,
}

/// One immutable entry in a currency ledger's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

/// One currency's activity within a statement: running balance plus ordered
/// transaction history. Transactions are append-only in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyLedger {
    pub currency: String,
    pub transactions: Vec<TransactionRecord>,
    pub closing_balance: Decimal,
}

impl CurrencyLedger {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            transactions: Vec::new(),
            closing_balance: Decimal::ZERO,
        }
    }

    /// Apply one transaction: adjust the running balance and append the
    /// record. Inbound credits, outbound debits.
    pub fn apply(&mut self, kind: TransactionType, amount: Decimal, date: DateTime<Utc>) {
        self.closing_balance = match kind {
            TransactionType::Inbound => self.closing_balance + amount,
            TransactionType::Outbound => self.closing_balance - amount,
        };
        self.transactions.push(TransactionRecord { kind, amount, date });
    }
}

/// One account's financial activity for one calendar month. At most one
/// statement exists per (account_id, year, month); the unique index on the
/// statements collection enforces this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "_id")]
    pub id: String,
    pub account_id: String,
    pub month: u32,
    pub year: i32,
    pub currencies: Vec<CurrencyLedger>,
}

impl Statement {
    pub fn new(account_id: &str, period: Period) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            month: period.month,
            year: period.year,
            currencies: Vec::new(),
        }
    }

    pub fn ledger(&self, currency: &str) -> Option<&CurrencyLedger> {
        self.currencies.iter().find(|l| l.currency == currency)
    }

    /// Locate-or-insert the ledger for `currency`. Currency codes are unique
    /// within one statement and keep first-seen order.
    pub fn ledger_mut(&mut self, currency: &str) -> &mut CurrencyLedger {
        let index = match self.currencies.iter().position(|l| l.currency == currency) {
            Some(index) => index,
            None => {
                self.currencies.push(CurrencyLedger::new(currency));
                self.currencies.len() - 1
            }
        };
        &mut self.currencies[index]
    }
}
