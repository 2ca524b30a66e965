//! Transaction record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use validator::Validate;

use crate::scoring::Verdict;

/// Feature vector submitted for analysis
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,

    #[validate(range(min = 0))]
    pub transaction_count_1h: i32,

    #[validate(range(min = 0))]
    pub transaction_count_24h: i32,

    #[validate(range(min = 0))]
    pub different_merchants_24h: i32,

    #[validate(range(exclusive_min = 0.0))]
    pub avg_transaction_amount: f64,

    #[validate(range(min = 0.0))]
    pub time_since_last_transaction: f64,

    #[validate(range(min = 0, max = 1))]
    pub is_weekend: i32,

    #[validate(range(min = 0, max = 1))]
    pub is_night_time: i32,

    #[validate(range(min = 0.0, max = 1.0))]
    pub merchant_risk_score: f64,

    #[validate(range(min = 0.0))]
    pub card_age_days: f64,

    #[validate(range(exclusive_min = 0.0))]
    pub transaction_velocity: f64,

    #[validate(range(exclusive_min = 0.0))]
    pub amount_deviation: f64,

    #[validate(range(min = 0, max = 1))]
    pub cross_border: i32,

    #[validate(range(min = 0, max = 1))]
    pub device_change: i32,

    #[validate(range(min = 0, max = 1))]
    pub ip_change: i32,
}

/// Persisted transaction: feature vector plus the scoring verdict
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: i64,
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
    pub is_fraud: bool,
    pub fraud_probability: f64,
    pub risk_level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Insert a new record. Timestamps are stamped here, not by the database.
    pub async fn insert(
        conn: &mut PgConnection,
        features: &AnalyzeRequest,
        verdict: &Verdict,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, TransactionRecord>(
            r#"
            INSERT INTO transactions (
                amount, transaction_count_1h, transaction_count_24h,
                different_merchants_24h, avg_transaction_amount, time_since_last_transaction,
                is_weekend, is_night_time, merchant_risk_score, card_age_days,
                transaction_velocity, amount_deviation, cross_border, device_change, ip_change,
                is_fraud, fraud_probability, risk_level, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING *
            "#
        )
        .bind(features.amount)
        .bind(features.transaction_count_1h)
        .bind(features.transaction_count_24h)
        .bind(features.different_merchants_24h)
        .bind(features.avg_transaction_amount)
        .bind(features.time_since_last_transaction)
        .bind(features.is_weekend)
        .bind(features.is_night_time)
        .bind(features.merchant_risk_score)
        .bind(features.card_age_days)
        .bind(features.transaction_velocity)
        .bind(features.amount_deviation)
        .bind(features.cross_border)
        .bind(features.device_change)
        .bind(features.ip_change)
        .bind(verdict.is_fraud)
        .bind(verdict.fraud_probability)
        .bind(&verdict.risk_level)
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await
    }

    /// All fraudulent records, insertion order
    pub async fn list_fraudulent(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TransactionRecord>(
            "SELECT * FROM transactions WHERE is_fraud = true"
        )
        .fetch_all(pool)
        .await
    }

    /// Fraudulent records created within [start, end] inclusive.
    /// An inverted range simply matches nothing.
    pub async fn list_between(
        pool: &PgPool,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT * FROM transactions
            WHERE is_fraud = true AND created_at BETWEEN $1 AND $2
            "#
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// The 10 most recent records
    pub async fn list_recent(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT * FROM transactions
            ORDER BY created_at DESC
            LIMIT 10
            "#
        )
        .fetch_all(pool)
        .await
    }

    /// HIGH-risk records, most probable first; id breaks probability ties
    pub async fn list_high_risk(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT * FROM transactions
            WHERE risk_level = 'HIGH'
            ORDER BY fraud_probability DESC, id
            "#
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await
    }

    pub async fn count_fraud(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE is_fraud = true")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> AnalyzeRequest {
        serde_json::from_value(serde_json::json!({
            "amount": 1500.0,
            "transactionCount1h": 3,
            "transactionCount24h": 20,
            "differentMerchants24h": 5,
            "avgTransactionAmount": 200.0,
            "timeSinceLastTransaction": 0.5,
            "isWeekend": 0,
            "isNightTime": 1,
            "merchantRiskScore": 0.8,
            "cardAgeDays": 10.0,
            "transactionVelocity": 5.0,
            "amountDeviation": 6.5,
            "crossBorder": 1,
            "deviceChange": 1,
            "ipChange": 0
        }))
        .unwrap()
    }

    #[test]
    fn analyze_request_accepts_camel_case_json() {
        let req = valid_request();
        assert_eq!(req.amount, 1500.0);
        assert_eq!(req.transaction_count_24h, 20);
        assert_eq!(req.different_merchants_24h, 5);
        assert_eq!(req.is_night_time, 1);
        assert_eq!(req.cross_border, 1);
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn zero_amount_fails_validation() {
        let mut req = valid_request();
        req.amount = 0.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn merchant_risk_score_above_one_fails_validation() {
        let mut req = valid_request();
        req.merchant_risk_score = 1.5;
        assert!(req.validate().is_err());
    }

    #[test]
    fn binary_flags_reject_values_outside_zero_one() {
        let mut req = valid_request();
        req.cross_border = 2;
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.is_weekend = -1;
        assert!(req.validate().is_err());
    }

    #[test]
    fn negative_count_fails_validation() {
        let mut req = valid_request();
        req.transaction_count_1h = -1;
        assert!(req.validate().is_err());
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = TransactionRecord {
            id: 1,
            amount: 100.0,
            transaction_count_1h: 1,
            transaction_count_24h: 2,
            different_merchants_24h: 1,
            avg_transaction_amount: 90.0,
            time_since_last_transaction: 10.0,
            is_weekend: 0,
            is_night_time: 0,
            merchant_risk_score: 0.1,
            card_age_days: 365.0,
            transaction_velocity: 1.0,
            amount_deviation: 0.5,
            cross_border: 0,
            device_change: 0,
            ip_change: 0,
            is_fraud: false,
            fraud_probability: 0.05,
            risk_level: "LOW".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("transactionCount1h"));
        assert!(obj.contains_key("isFraud"));
        assert!(obj.contains_key("fraudProbability"));
        assert!(obj.contains_key("riskLevel"));
        assert!(obj.contains_key("createdAt"));
    }
}
