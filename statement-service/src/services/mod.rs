pub mod database;
pub mod metrics;
pub mod reporting;

pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics};
pub use reporting::ReportingService;
