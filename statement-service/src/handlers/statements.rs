use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::{StatementParams, StatementResponse};
use crate::startup::AppState;

/// Serve one monthly statement. A missing statement is a normal outcome and
/// maps to 404 via the error taxonomy.
pub async fn get_statement(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(params): Query<StatementParams>,
) -> Result<impl IntoResponse, AppError> {
    if !(1..=12).contains(&params.month) {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Month must be between 1 and 12, got {}",
            params.month
        )));
    }

    metrics::counter!("statement_lookup_total").increment(1);

    let statement = state
        .reporting
        .get_statement(&account_id, params.year, params.month)
        .await?;

    Ok(Json(StatementResponse::from(statement)))
}
