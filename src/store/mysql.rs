use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::error::{StoreError, StoreResult};
use crate::model::attendance::{AttendanceRecord, AttendanceRow, AttendanceStatus, NewAttendance};
use crate::store::{AttendanceStore, EmployeeDirectory};

const ATTENDANCE_SELECT_SQL: &str = r#"
    SELECT id, employee_id, date, status
    FROM attendance_records
"#;

/// Attendance store over the `attendance_records` table.
///
/// Relies on the `uq_attendance_employee_date` unique key created by
/// [`crate::db::ensure_attendance_schema`].
#[derive(Clone)]
pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn into_records(rows: Vec<AttendanceRow>) -> StoreResult<Vec<AttendanceRecord>> {
    rows.into_iter().map(AttendanceRecord::try_from).collect()
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn find_by_employee_and_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let sql = format!("{ATTENDANCE_SELECT_SQL} WHERE employee_id = ? AND date = ?");

        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(employee_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn insert(&self, record: &NewAttendance) -> StoreResult<String> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_records (employee_id, date, status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&record.employee_id)
        .bind(record.date)
        .bind(record.status.as_ref())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_id().to_string()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateKey {
                    employee_id: record.employee_id.clone(),
                    date: record.date,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_employee(&self, employee_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!("{ATTENDANCE_SELECT_SQL} WHERE employee_id = ?");

        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;

        into_records(rows)
    }

    async fn find_by_optional_date(
        &self,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let rows = match date {
            Some(date) => {
                let sql = format!("{ATTENDANCE_SELECT_SQL} WHERE date = ?");
                sqlx::query_as::<_, AttendanceRow>(&sql)
                    .bind(date)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, AttendanceRow>(ATTENDANCE_SELECT_SQL)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        into_records(rows)
    }

    async fn count_where(&self, employee_id: &str, status: AttendanceStatus) -> StoreResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM attendance_records
            WHERE employee_id = ? AND status = ?
            "#,
        )
        .bind(employee_id)
        .bind(status.as_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn aggregate_count_by_employee(
        &self,
        status: AttendanceStatus,
    ) -> StoreResult<BTreeMap<String, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT employee_id, COUNT(*) AS total
            FROM attendance_records
            WHERE status = ?
            GROUP BY employee_id
            "#,
        )
        .bind(status.as_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}

/// Existence checks against the `employees` table, keyed by `employee_code`
/// compared case-sensitively.
#[derive(Clone)]
pub struct MySqlEmployeeDirectory {
    pool: MySqlPool,
}

impl MySqlEmployeeDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeDirectory for MySqlEmployeeDirectory {
    async fn exists(&self, employee_id: &str) -> StoreResult<bool> {
        let matches = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE employee_code = ? COLLATE utf8mb4_bin",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(matches > 0)
    }
}
