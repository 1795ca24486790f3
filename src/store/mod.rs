//! Persistence contracts for attendance records and the employee directory.
//!
//! The store owns the one-record-per-employee-per-day invariant: every
//! implementation must reject a second insert for the same
//! (employee_id, date) with [`StoreError::DuplicateKey`].
//!
//! [`StoreError::DuplicateKey`]: crate::error::StoreError::DuplicateKey

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreResult;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendance};

pub mod memory;
pub mod mysql;

pub use memory::{InMemoryAttendanceStore, InMemoryEmployeeDirectory};
pub use mysql::{MySqlAttendanceStore, MySqlEmployeeDirectory};

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find_by_employee_and_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>>;

    /// Persists a record and returns its generated id.
    async fn insert(&self, record: &NewAttendance) -> StoreResult<String>;

    /// Records for one employee, in storage order.
    async fn find_by_employee(&self, employee_id: &str) -> StoreResult<Vec<AttendanceRecord>>;

    /// Records on `date`, or every record when `date` is `None`.
    async fn find_by_optional_date(
        &self,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    async fn count_where(&self, employee_id: &str, status: AttendanceStatus) -> StoreResult<i64>;

    /// Per-employee count of records with `status`. Employees without a
    /// matching record are absent from the map.
    async fn aggregate_count_by_employee(
        &self,
        status: AttendanceStatus,
    ) -> StoreResult<BTreeMap<String, i64>>;
}

/// Read-only view of the employee registry.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn exists(&self, employee_id: &str) -> StoreResult<bool>;
}
