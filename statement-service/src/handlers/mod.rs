pub mod events;
pub mod health;
pub mod statements;

pub use events::ingest_event;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use statements::get_statement;
