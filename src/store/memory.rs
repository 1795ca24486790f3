//! Process-local store and directory, used by the test suites.
//!
//! Locks are never held across an await point.

use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendance};
use crate::store::{AttendanceStore, EmployeeDirectory};

/// Attendance records kept in insertion order.
#[derive(Default)]
pub struct InMemoryAttendanceStore {
    records: RwLock<Vec<AttendanceRecord>>,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.records.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn select<F>(&self, predicate: F) -> StoreResult<Vec<AttendanceRecord>>
    where
        F: Fn(&AttendanceRecord) -> bool,
    {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().filter(|r| predicate(r)).cloned().collect())
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn find_by_employee_and_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .cloned())
    }

    async fn insert(&self, record: &NewAttendance) -> StoreResult<String> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;

        // Same guarantee as the unique key on the MySQL table.
        if records
            .iter()
            .any(|r| r.employee_id == record.employee_id && r.date == record.date)
        {
            return Err(StoreError::DuplicateKey {
                employee_id: record.employee_id.clone(),
                date: record.date,
            });
        }

        let id = Uuid::new_v4().to_string();
        records.push(AttendanceRecord {
            id: id.clone(),
            employee_id: record.employee_id.clone(),
            date: record.date,
            status: record.status,
        });

        Ok(id)
    }

    async fn find_by_employee(&self, employee_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        self.select(|r| r.employee_id == employee_id)
    }

    async fn find_by_optional_date(
        &self,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        self.select(|r| date.is_none_or(|d| r.date == d))
    }

    async fn count_where(&self, employee_id: &str, status: AttendanceStatus) -> StoreResult<i64> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let total = records
            .iter()
            .filter(|r| r.employee_id == employee_id && r.status == status)
            .count();

        Ok(total as i64)
    }

    async fn aggregate_count_by_employee(
        &self,
        status: AttendanceStatus,
    ) -> StoreResult<BTreeMap<String, i64>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let mut counts = BTreeMap::new();
        for record in records.iter().filter(|r| r.status == status) {
            *counts.entry(record.employee_id.clone()).or_insert(0) += 1;
        }

        Ok(counts)
    }
}

/// Employee ids known to the service. Removal does not touch attendance.
#[derive(Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashSet<String>>,
}

impl InMemoryEmployeeDirectory {
    pub fn with_employees<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            employees: RwLock::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    pub fn register(&self, employee_id: impl Into<String>) -> StoreResult<()> {
        self.employees
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(employee_id.into());
        Ok(())
    }

    /// Returns whether the id was registered.
    pub fn remove(&self, employee_id: &str) -> StoreResult<bool> {
        Ok(self
            .employees
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .remove(employee_id))
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn exists(&self, employee_id: &str) -> StoreResult<bool> {
        Ok(self
            .employees
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .contains(employee_id))
    }
}
