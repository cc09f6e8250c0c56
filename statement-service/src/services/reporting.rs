//! Statement aggregation engine.
//!
//! Each operation is a load-mutate-save of one whole statement document,
//! serialized per (account_id, year, month) by an in-process lock so that
//! concurrent events for the same key cannot lose updates. Different keys
//! proceed concurrently. Persistence failures propagate verbatim; there is
//! no partial-success state because every operation writes the document
//! exactly once.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use mongodb::bson::doc;
use mongodb::options::ReplaceOptions;
use mongodb::Collection;
use service_core::error::AppError;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::events::{AccountEvent, TransactionEvent};
use crate::models::Statement;
use crate::period::{resolve_period, Period};
use crate::services::database::MongoDb;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StatementKey {
    account_id: String,
    year: i32,
    month: u32,
}

impl StatementKey {
    fn new(account_id: &str, period: Period) -> Self {
        Self {
            account_id: account_id.to_string(),
            year: period.year,
            month: period.month,
        }
    }
}

#[derive(Clone)]
pub struct ReportingService {
    statements: Collection<Statement>,
    // Lock registry entries are never evicted; the map is bounded by the
    // number of active account-periods in this process.
    locks: Arc<DashMap<StatementKey, Arc<Mutex<()>>>>,
}

impl ReportingService {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            statements: db.statements(),
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Apply one transaction to the statement of its account and period.
    ///
    /// Replays are NOT idempotent: the same event applied twice appends two
    /// records and moves the balance twice. `transaction_id` is logged for
    /// traceability only.
    pub async fn apply_transaction(&self, event: TransactionEvent) -> Result<(), AppError> {
        let period = resolve_period(event.date);
        let key = StatementKey::new(&event.account_id, period);
        let _guard = self.lock_for(&key).await;

        let mut statement = self.fetch_or_create(&key).await?;
        let ledger = statement.ledger_mut(&event.currency);
        ledger.apply(event.kind, event.amount, event.date);
        let closing_balance = ledger.closing_balance;

        self.persist(&statement).await?;

        tracing::info!(
            account_id = %event.account_id,
            transaction_id = %event.transaction_id,
            currency = %event.currency,
            month = period.month,
            year = period.year,
            closing_balance = %closing_balance,
            "Applied transaction to statement"
        );

        Ok(())
    }

    /// Apply a full balance snapshot: overwrite the closing balance of every
    /// listed currency without appending ledger history. Currencies are
    /// processed in input order; a balance missing from the mapping counts
    /// as zero. Duplicate currency codes fail fast before anything is
    /// touched.
    pub async fn apply_account_snapshot(&self, event: AccountEvent) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        for currency in &event.currencies {
            if !seen.insert(currency.as_str()) {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Duplicate currency {} in account snapshot for account {}",
                    currency,
                    event.id
                )));
            }
        }

        let period = resolve_period(event.date);
        let key = StatementKey::new(&event.id, period);
        let _guard = self.lock_for(&key).await;

        let mut statement = self.fetch_or_create(&key).await?;
        for currency in &event.currencies {
            let balance = event.balances.get(currency).copied().unwrap_or_default();
            statement.ledger_mut(currency).closing_balance = balance;
        }

        self.persist(&statement).await?;

        tracing::info!(
            account_id = %event.id,
            customer_id = %event.customer_id,
            currencies = event.currencies.len(),
            month = period.month,
            year = period.year,
            "Applied account snapshot to statement"
        );

        Ok(())
    }

    /// Fetch the statement for the exact (account_id, year, month) tuple.
    /// Absence is an expected outcome and maps to NotFound.
    pub async fn get_statement(
        &self,
        account_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Statement, AppError> {
        let filter = doc! { "account_id": account_id, "year": year, "month": month };
        self.statements.find_one(filter, None).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!(
                "No statement found for account {} in {}/{}",
                account_id,
                month,
                year
            ))
        })
    }

    async fn lock_for(&self, key: &StatementKey) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(key.clone()).or_default().clone();
        lock.lock_owned().await
    }

    async fn fetch_or_create(&self, key: &StatementKey) -> Result<Statement, AppError> {
        let filter = doc! { "account_id": &key.account_id, "year": key.year, "month": key.month };
        match self.statements.find_one(filter, None).await? {
            Some(statement) => Ok(statement),
            None => {
                let period = Period {
                    month: key.month,
                    year: key.year,
                };
                Ok(Statement::new(&key.account_id, period))
            }
        }
    }

    async fn persist(&self, statement: &Statement) -> Result<(), AppError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.statements
            .replace_one(doc! { "_id": &statement.id }, statement, options)
            .await?;
        Ok(())
    }
}
