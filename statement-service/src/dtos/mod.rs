use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CurrencyLedger, Statement, TransactionRecord, TransactionType};

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub id: String,
    pub account_id: String,
    pub month: u32,
    pub year: i32,
    pub currencies: Vec<CurrencyLedgerResponse>,
}

#[derive(Debug, Serialize)]
pub struct CurrencyLedgerResponse {
    pub currency: String,
    pub transactions: Vec<TransactionResponse>,
    pub closing_balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub date: String,
}

impl From<Statement> for StatementResponse {
    fn from(statement: Statement) -> Self {
        Self {
            id: statement.id,
            account_id: statement.account_id,
            month: statement.month,
            year: statement.year,
            currencies: statement
                .currencies
                .into_iter()
                .map(CurrencyLedgerResponse::from)
                .collect(),
        }
    }
}

impl From<CurrencyLedger> for CurrencyLedgerResponse {
    fn from(ledger: CurrencyLedger) -> Self {
        Self {
            currency: ledger.currency,
            transactions: ledger
                .transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
            closing_balance: ledger.closing_balance,
        }
    }
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(record: TransactionRecord) -> Self {
        Self {
            kind: record.kind,
            amount: record.amount,
            date: record.date.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatementParams {
    pub year: i32,
    pub month: u32,
}
