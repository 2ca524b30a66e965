//! Transaction list handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::models::TransactionRecord;
use crate::{AppResult, AppState};

/// Period bounds, ISO local datetimes interpreted as UTC
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// List all fraudulent transactions
pub async fn list_fraudulent(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TransactionRecord>>> {
    let transactions = TransactionRecord::list_fraudulent(&state.pool).await?;
    Ok(Json(transactions))
}

/// List fraudulent transactions within a period
pub async fn list_by_period(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<TransactionRecord>>> {
    tracing::info!("Period query - {} ~ {}", query.start, query.end);

    let transactions = TransactionRecord::list_between(
        &state.pool,
        query.start.and_utc(),
        query.end.and_utc(),
    )
    .await?;
    Ok(Json(transactions))
}

/// List the 10 most recent transactions
pub async fn list_recent(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TransactionRecord>>> {
    let transactions = TransactionRecord::list_recent(&state.pool).await?;
    Ok(Json(transactions))
}

/// List HIGH-risk transactions, most probable first
pub async fn list_high_risk(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TransactionRecord>>> {
    let transactions = TransactionRecord::list_high_risk(&state.pool).await?;
    Ok(Json(transactions))
}
