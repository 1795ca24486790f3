//! Attendance use cases.
//!
//! # Invariants
//! - One record per employee per calendar day. The store's unique key is the
//!   enforcement point; this service translates its violation into
//!   `DuplicateAttendance`.
//! - Writes require the employee to exist in the directory at call time.
//!   Read paths never consult the directory.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{AttendanceError, AttendanceResult, StoreError};
use crate::model::attendance::{
    AttendanceList, AttendanceRecord, AttendanceStatus, NewAttendance, PresenceSummary,
};
use crate::store::{AttendanceStore, EmployeeDirectory};

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { store, directory }
    }

    /// Records `status` for `employee_id` on `date`.
    ///
    /// The existence check and the insert are separate round trips with no
    /// shared transaction: an employee removed in between still gets the
    /// record.
    ///
    /// # Errors
    /// - `EmployeeNotFound` when the directory does not know `employee_id`.
    /// - `DuplicateAttendance` when a record for that day already exists,
    ///   including one written by a concurrent call.
    pub async fn mark_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> AttendanceResult<()> {
        if !self.directory.exists(employee_id).await? {
            debug!(employee_id, "Attendance rejected, unknown employee");
            return Err(AttendanceError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }

        let record = NewAttendance {
            employee_id: employee_id.to_string(),
            date,
            status,
        };

        match self.store.insert(&record).await {
            Ok(id) => {
                info!(id = %id, employee_id, %date, %status, "Attendance marked");
                Ok(())
            }
            Err(StoreError::DuplicateKey { employee_id, date }) => {
                debug!(employee_id = %employee_id, %date, "Attendance already marked");
                Err(AttendanceError::DuplicateAttendance { employee_id, date })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All records for `employee_id`. An empty id yields no records.
    pub async fn get_by_employee(&self, employee_id: &str) -> AttendanceResult<Vec<AttendanceRecord>> {
        if employee_id.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.store.find_by_employee(employee_id).await?)
    }

    /// Records on `date`, or all records when no date is given.
    pub async fn filter_by_date(&self, date: Option<NaiveDate>) -> AttendanceResult<AttendanceList> {
        let records = self.store.find_by_optional_date(date).await?;
        debug!(date = ?date, count = records.len(), "Filtered attendance");
        Ok(AttendanceList::from(records))
    }

    /// PRESENT-day totals for every employee with at least one PRESENT record.
    ///
    /// Callers must not rely on the order of the result.
    pub async fn summary(&self) -> AttendanceResult<Vec<PresenceSummary>> {
        let counts = self
            .store
            .aggregate_count_by_employee(AttendanceStatus::Present)
            .await?;

        Ok(counts
            .into_iter()
            .map(|(employee_id, total_present_days)| PresenceSummary {
                employee_id,
                total_present_days,
            })
            .collect())
    }

    /// PRESENT-day total for one employee; 0 for ids with no records,
    /// known or not.
    pub async fn employee_summary(&self, employee_id: &str) -> AttendanceResult<PresenceSummary> {
        let total_present_days = self
            .store
            .count_where(employee_id, AttendanceStatus::Present)
            .await?;

        Ok(PresenceSummary {
            employee_id: employee_id.to_string(),
            total_present_days,
        })
    }
}
