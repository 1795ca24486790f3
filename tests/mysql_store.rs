//! Runs against a real MySQL server:
//! `DATABASE_URL=mysql://... cargo test --test mysql_store -- --ignored`

use chrono::NaiveDate;
use hrms_attendance::db::{ensure_attendance_schema, init_db};
use hrms_attendance::{
    AttendanceService, AttendanceStatus, AttendanceStore, EmployeeDirectory, MySqlAttendanceStore,
    MySqlEmployeeDirectory, NewAttendance, StoreError,
};
use sqlx::MySqlPool;
use std::sync::Arc;
use uuid::Uuid;

const NEEDS_MYSQL: &str = "needs a MySQL server at DATABASE_URL";

// Default collation on purpose: the directory query must stay case-sensitive
// even when `employee_code` is not.
const EMPLOYEES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_code VARCHAR(64) NOT NULL
    )
"#;

async fn pool() -> MySqlPool {
    let url = std::env::var("DATABASE_URL").expect(NEEDS_MYSQL);
    let pool = init_db(&url, 4).await.unwrap();
    ensure_attendance_schema(&pool).await.unwrap();
    sqlx::query(EMPLOYEES_DDL).execute(&pool).await.unwrap();
    pool
}

/// Employee id no other run has used.
fn fresh_id() -> String {
    format!("Emp{}", Uuid::new_v4().to_simple())
}

async fn register(pool: &MySqlPool, employee_code: &str) {
    sqlx::query("INSERT INTO employees (employee_code) VALUES (?)")
        .bind(employee_code)
        .execute(pool)
        .await
        .unwrap();
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn new_attendance(employee_id: &str, date: NaiveDate, status: AttendanceStatus) -> NewAttendance {
    NewAttendance {
        employee_id: employee_id.to_string(),
        date,
        status,
    }
}

#[actix_web::test]
#[ignore = "needs a MySQL server at DATABASE_URL"]
async fn second_insert_for_same_day_is_duplicate_key() {
    let store = MySqlAttendanceStore::new(pool().await);
    let employee = fresh_id();

    let id = store
        .insert(&new_attendance(&employee, day(2024, 1, 1), AttendanceStatus::Present))
        .await
        .unwrap();
    assert!(id.parse::<u64>().is_ok());

    let err = store
        .insert(&new_attendance(&employee, day(2024, 1, 1), AttendanceStatus::Absent))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateKey { ref employee_id, date }
            if *employee_id == employee && date == day(2024, 1, 1)
    ));

    let stored = store
        .find_by_employee_and_date(&employee, day(2024, 1, 1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.status, AttendanceStatus::Present);
}

#[actix_web::test]
#[ignore = "needs a MySQL server at DATABASE_URL"]
async fn counts_decode_as_i64() {
    let store = MySqlAttendanceStore::new(pool().await);
    let (first, second) = (fresh_id(), fresh_id());

    for (employee, date, status) in [
        (&first, day(2024, 2, 1), AttendanceStatus::Present),
        (&first, day(2024, 2, 2), AttendanceStatus::Present),
        (&first, day(2024, 2, 3), AttendanceStatus::Absent),
        (&second, day(2024, 2, 1), AttendanceStatus::Absent),
    ] {
        store
            .insert(&new_attendance(employee, date, status))
            .await
            .unwrap();
    }

    assert_eq!(
        store
            .count_where(&first, AttendanceStatus::Present)
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        store
            .count_where(&second, AttendanceStatus::Present)
            .await
            .unwrap(),
        0
    );

    let present = store
        .aggregate_count_by_employee(AttendanceStatus::Present)
        .await
        .unwrap();
    assert_eq!(present.get(&first), Some(&2));
    assert!(!present.contains_key(&second));

    let absent = store
        .aggregate_count_by_employee(AttendanceStatus::Absent)
        .await
        .unwrap();
    assert_eq!(absent.get(&first), Some(&1));
    assert_eq!(absent.get(&second), Some(&1));

    let records = store.find_by_employee(&first).await.unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.employee_id == first));
}

#[actix_web::test]
#[ignore = "needs a MySQL server at DATABASE_URL"]
async fn directory_reports_registered_codes() {
    let pool = pool().await;
    let directory = MySqlEmployeeDirectory::new(pool.clone());
    let employee = fresh_id();

    assert!(!directory.exists(&employee).await.unwrap());
    register(&pool, &employee).await;
    assert!(directory.exists(&employee).await.unwrap());
}

#[actix_web::test]
#[ignore = "needs a MySQL server at DATABASE_URL"]
async fn employee_ids_differing_only_in_case_are_distinct() {
    let pool = pool().await;
    let upper = fresh_id().to_uppercase();
    let lower = upper.to_lowercase();

    let directory = MySqlEmployeeDirectory::new(pool.clone());
    register(&pool, &upper).await;
    assert!(directory.exists(&upper).await.unwrap());
    assert!(!directory.exists(&lower).await.unwrap());

    register(&pool, &lower).await;
    let service = AttendanceService::new(
        Arc::new(MySqlAttendanceStore::new(pool.clone())),
        Arc::new(directory),
    );

    service
        .mark_attendance(&upper, day(2024, 3, 1), AttendanceStatus::Present)
        .await
        .unwrap();
    service
        .mark_attendance(&lower, day(2024, 3, 1), AttendanceStatus::Absent)
        .await
        .unwrap();

    let upper_records = service.get_by_employee(&upper).await.unwrap();
    assert_eq!(upper_records.len(), 1);
    assert_eq!(upper_records[0].status, AttendanceStatus::Present);

    let lower_records = service.get_by_employee(&lower).await.unwrap();
    assert_eq!(lower_records.len(), 1);
    assert_eq!(lower_records[0].status, AttendanceStatus::Absent);

    assert_eq!(
        service.employee_summary(&lower).await.unwrap().total_present_days,
        0
    );
}
