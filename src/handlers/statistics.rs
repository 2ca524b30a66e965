//! Statistics handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::TransactionRecord;
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_transactions: i64,
    pub fraud_transactions: i64,
    pub fraud_rate: String,
    pub normal_transactions: i64,
}

impl Statistics {
    fn from_counts(total: i64, fraud: i64) -> Self {
        let rate = if total > 0 {
            fraud as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_transactions: total,
            fraud_transactions: fraud,
            fraud_rate: format!("{:.2}%", rate),
            normal_transactions: total - fraud,
        }
    }
}

/// Aggregate transaction statistics
pub async fn statistics(State(state): State<AppState>) -> AppResult<Json<Statistics>> {
    let total = TransactionRecord::count_all(&state.pool).await?;
    let fraud = TransactionRecord::count_fraud(&state.pool).await?;

    Ok(Json(Statistics::from_counts(total, fraud)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_yields_zero_rate() {
        let stats = Statistics::from_counts(0, 0);
        assert_eq!(stats.total_transactions, 0);
        assert_eq!(stats.fraud_transactions, 0);
        assert_eq!(stats.normal_transactions, 0);
        assert_eq!(stats.fraud_rate, "0.00%");
    }

    #[test]
    fn rate_is_formatted_to_two_decimals() {
        let stats = Statistics::from_counts(3, 1);
        assert_eq!(stats.fraud_rate, "33.33%");

        let stats = Statistics::from_counts(4, 1);
        assert_eq!(stats.fraud_rate, "25.00%");
    }

    #[test]
    fn normal_count_is_the_complement_of_fraud() {
        let stats = Statistics::from_counts(10, 3);
        assert_eq!(stats.normal_transactions, 7);
        assert_eq!(
            stats.total_transactions,
            stats.fraud_transactions + stats.normal_transactions
        );
    }

    #[test]
    fn statistics_serialize_with_snake_case_keys() {
        let value = serde_json::to_value(Statistics::from_counts(10, 3)).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("total_transactions"));
        assert!(obj.contains_key("fraud_transactions"));
        assert!(obj.contains_key("fraud_rate"));
        assert!(obj.contains_key("normal_transactions"));
    }
}
