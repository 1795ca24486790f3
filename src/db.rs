use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

// The unique key is what keeps concurrent marks for the same day from both
// landing; the store maps its violation to a duplicate. Employee ids are
// opaque, so they compare byte for byte (`utf8mb4_bin`), never by collation.
const ATTENDANCE_TABLE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS attendance_records (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id VARCHAR(64) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        date DATE NOT NULL,
        status VARCHAR(16) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        UNIQUE KEY uq_attendance_employee_date (employee_id, date),
        KEY idx_attendance_date (date),
        KEY idx_attendance_status (status, employee_id)
    )
"#;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Creates `attendance_records` when it does not exist yet.
pub async fn ensure_attendance_schema(pool: &MySqlPool) -> Result<()> {
    sqlx::query(ATTENDANCE_TABLE_DDL)
        .execute(pool)
        .await
        .context("Failed to create attendance_records table")?;

    Ok(())
}
