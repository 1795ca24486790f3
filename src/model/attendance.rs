use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::error::StoreError;

/// Daily attendance status. Closed set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Attendance record as returned to callers.
///
/// `id` is the storage-generated identifier, rendered as a string under the
/// `_id` key that existing clients read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "_id": "1",
    "employeeId": "E1",
    "date": "2024-01-01",
    "status": "PRESENT"
}))]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Record to be written; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Row shape of `attendance_records`.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: u64,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<AttendanceStatus>().map_err(|_| {
            StoreError::InvalidData(format!(
                "record {} has unknown status `{}`",
                row.id, row.status
            ))
        })?;

        Ok(AttendanceRecord {
            id: row.id.to_string(),
            employee_id: row.employee_id,
            date: row.date,
            status,
        })
    }
}

/// Result of the date filter: the matching records and how many there are.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceList {
    #[schema(example = 1)]
    pub count: usize,
    pub records: Vec<AttendanceRecord>,
}

impl From<Vec<AttendanceRecord>> for AttendanceList {
    fn from(records: Vec<AttendanceRecord>) -> Self {
        Self {
            count: records.len(),
            records,
        }
    }
}

/// Number of PRESENT days recorded for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresenceSummary {
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = 2)]
    pub total_present_days: i64,
}
