use statement_service::config::StatementConfig;
use statement_service::models::Statement;
use statement_service::services::MongoDb;
use statement_service::startup::Application;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let db_name = format!("statement_test_{}", Uuid::new_v4().simple());

        let mut config = StatementConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            db,
            db_name,
            client: reqwest::Client::new(),
        }
    }

    /// Post one event envelope to the intake endpoint.
    pub async fn post_event(&self, event: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/events", self.address))
            .json(&event)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Fetch one monthly statement through the read API.
    pub async fn get_statement(&self, account_id: &str, year: i32, month: u32) -> reqwest::Response {
        self.client
            .get(format!(
                "{}/accounts/{}/statements?year={}&month={}",
                self.address, account_id, year, month
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Read the stored statement document directly, bypassing the HTTP API.
    pub async fn find_stored_statement(
        &self,
        account_id: &str,
        year: i32,
        month: u32,
    ) -> Option<Statement> {
        self.db
            .statements()
            .find_one(
                mongodb::bson::doc! { "account_id": account_id, "year": year, "month": month },
                None,
            )
            .await
            .expect("Failed to query statements collection")
    }

    /// Cleanup test resources (drop the per-test database).
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
