//! ML scoring client
//!
//! HTTP client for the external fraud scoring service.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::AnalyzeRequest;

/// Outbound payload for `/api/predict`. Key names are fixed by the
/// scoring service contract.
#[derive(Debug, Serialize)]
pub struct ScoringRequest {
    pub amount: f64,
    pub transaction_count_1h: i32,
    pub transaction_count_24h: i32,
    pub different_merchants_24h: i32,
    pub avg_transaction_amount: f64,
    pub time_since_last_transaction: f64,
    pub is_weekend: i32,
    pub is_night_time: i32,
    pub merchant_risk_score: f64,
    pub card_age_days: f64,
    pub transaction_velocity: f64,
    pub amount_deviation: f64,
    pub cross_border: i32,
    pub device_change: i32,
    pub ip_change: i32,
}

impl From<&AnalyzeRequest> for ScoringRequest {
    fn from(req: &AnalyzeRequest) -> Self {
        Self {
            amount: req.amount,
            transaction_count_1h: req.transaction_count_1h,
            transaction_count_24h: req.transaction_count_24h,
            different_merchants_24h: req.different_merchants_24h,
            avg_transaction_amount: req.avg_transaction_amount,
            time_since_last_transaction: req.time_since_last_transaction,
            is_weekend: req.is_weekend,
            is_night_time: req.is_night_time,
            merchant_risk_score: req.merchant_risk_score,
            card_age_days: req.card_age_days,
            transaction_velocity: req.transaction_velocity,
            amount_deviation: req.amount_deviation,
            cross_border: req.cross_border,
            device_change: req.device_change,
            ip_change: req.ip_change,
        }
    }
}

/// Prediction returned by the scoring service
#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    pub is_fraud: bool,
    pub fraud_probability: f64,
    pub risk_level: String,
    pub timestamp: String,
}

/// Scoring client errors
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("network error: {0}")]
    Network(String),

    #[error("scoring service returned status {0}")]
    Server(u16),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Scoring service client
#[derive(Clone)]
pub struct ScoringClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ScoringClient {
    /// Create new scoring client
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    /// Request a fraud prediction for one feature vector
    pub async fn predict(&self, features: &AnalyzeRequest) -> Result<Verdict, ScoringError> {
        let url = format!("{}/api/predict", self.base_url);
        let request = ScoringRequest::from(features);

        let response = self.http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoringError::Network(e.to_string()))?;

        if response.status().is_success() {
            response.json().await
                .map_err(|e| ScoringError::Parse(e.to_string()))
        } else {
            Err(ScoringError::Server(response.status().as_u16()))
        }
    }
}
