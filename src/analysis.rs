//! Analysis orchestration
//!
//! The single write path: score a feature vector, persist the merged
//! record, and build the response summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{AnalyzeRequest, TransactionRecord};
use crate::scoring::ScoringClient;

const FRAUD_MESSAGE: &str = "이상거래가 탐지되었습니다";
const NORMAL_MESSAGE: &str = "정상 거래입니다";

/// Analysis result returned to the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub transaction_id: i64,
    pub is_fraud: bool,
    pub fraud_probability: f64,
    pub risk_level: String,
    pub message: String,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisSummary {
    fn from_record(record: &TransactionRecord) -> Self {
        let message = if record.is_fraud { FRAUD_MESSAGE } else { NORMAL_MESSAGE };

        Self {
            transaction_id: record.id,
            is_fraud: record.is_fraud,
            fraud_probability: record.fraud_probability,
            risk_level: record.risk_level.clone(),
            message: message.to_string(),
            analyzed_at: record.created_at,
        }
    }
}

/// Analyze one transaction: call the scoring service, persist the record,
/// return the summary. No record is written when scoring fails, and a failed
/// write leaves nothing visible to readers.
pub async fn analyze(
    pool: &PgPool,
    scoring: &ScoringClient,
    features: AnalyzeRequest,
) -> AppResult<AnalysisSummary> {
    let verdict = scoring
        .predict(&features)
        .await
        .map_err(|e| AppError::ScoringUnavailable(e.to_string()))?;

    tracing::info!(
        "Scoring complete - fraud: {}, probability: {}",
        verdict.is_fraud,
        verdict.fraud_probability
    );

    let mut tx = pool.begin().await?;
    let record = TransactionRecord::insert(&mut tx, &features, &verdict).await?;
    tx.commit().await?;

    tracing::info!("Transaction saved - id: {}", record.id);

    Ok(AnalysisSummary::from_record(&record))
}
