//! Transaction analysis handler

use axum::{extract::State, Json};
use validator::Validate;

use crate::analysis::{self, AnalysisSummary};
use crate::models::AnalyzeRequest;
use crate::{AppResult, AppState};

/// Analyze a single transaction
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalysisSummary>> {
    request.validate()?;

    tracing::info!("Analysis requested - amount: {}", request.amount);

    let summary = analysis::analyze(&state.pool, &state.scoring, request).await?;

    if summary.is_fraud {
        tracing::warn!(
            "Fraud detected - id: {}, probability: {}%",
            summary.transaction_id,
            summary.fraud_probability * 100.0
        );
    }

    Ok(Json(summary))
}
