use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::events::Event;
use crate::startup::AppState;

/// Event intake. Stands in for the queue trigger: one tagged envelope per
/// call, dispatched by its discriminant. Malformed payloads are rejected by
/// the extractor without touching the aggregation core.
pub async fn ingest_event(
    State(state): State<AppState>,
    Json(event): Json<Event>,
) -> Result<impl IntoResponse, AppError> {
    match event {
        Event::TransactionCreated(event) => {
            if event.amount.is_sign_negative() {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Transaction amount must be a non-negative magnitude, got {}",
                    event.amount
                )));
            }
            metrics::counter!("statement_events_total", "kind" => "transaction").increment(1);
            state.reporting.apply_transaction(event).await?;
        }
        Event::AccountCreated(event) | Event::AccountUpdated(event) => {
            metrics::counter!("statement_events_total", "kind" => "account_snapshot").increment(1);
            state.reporting.apply_account_snapshot(event).await?;
        }
    }

    Ok(StatusCode::ACCEPTED)
}
