//! Database module - PostgreSQL connection and schema

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Apply database schema
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create tables if not exist
    sqlx::query(SCHEMA_SQL)
        .execute(pool)
        .await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Analyzed transactions (features + scoring verdict)
CREATE TABLE IF NOT EXISTS transactions (
    id BIGSERIAL PRIMARY KEY,
    amount DOUBLE PRECISION NOT NULL,
    transaction_count_1h INT NOT NULL,
    transaction_count_24h INT NOT NULL,
    different_merchants_24h INT NOT NULL,
    avg_transaction_amount DOUBLE PRECISION NOT NULL,
    time_since_last_transaction DOUBLE PRECISION NOT NULL,
    is_weekend INT NOT NULL,
    is_night_time INT NOT NULL,
    merchant_risk_score DOUBLE PRECISION NOT NULL,
    card_age_days DOUBLE PRECISION NOT NULL,
    transaction_velocity DOUBLE PRECISION NOT NULL,
    amount_deviation DOUBLE PRECISION NOT NULL,
    cross_border INT NOT NULL,
    device_change INT NOT NULL,
    ip_change INT NOT NULL,
    is_fraud BOOLEAN NOT NULL,
    fraud_probability DOUBLE PRECISION NOT NULL,
    risk_level VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_transactions_fraud ON transactions(is_fraud);
CREATE INDEX IF NOT EXISTS idx_transactions_created ON transactions(created_at);
CREATE INDEX IF NOT EXISTS idx_transactions_risk ON transactions(risk_level);
"#;
