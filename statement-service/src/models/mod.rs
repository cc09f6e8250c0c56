pub mod statement;

pub use statement::{CurrencyLedger, Statement, TransactionRecord, TransactionType};
