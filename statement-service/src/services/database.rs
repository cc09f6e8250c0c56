use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

use crate::models::Statement;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for statement-service");

        // Unique compound index: at most one statement per account per
        // billing period. Concurrent creation of the same key surfaces as a
        // duplicate-key conflict.
        let account_period_index = IndexModel::builder()
            .keys(doc! { "account_id": 1, "year": 1, "month": 1 })
            .options(
                IndexOptions::builder()
                    .name("account_period_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.statements()
            .create_index(account_period_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create account_period_unique index on statements collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on statements.(account_id, year, month)");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn statements(&self) -> Collection<Statement> {
        self.db.collection("statements")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
