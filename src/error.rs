use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use derive_more::Display;
use serde_json::json;

pub type StoreResult<T> = Result<T, StoreError>;
pub type AttendanceResult<T> = Result<T, AttendanceError>;

/// Failures raised by attendance stores and employee directories.
#[derive(Debug, Display)]
pub enum StoreError {
    /// The (employee_id, date) unique key already holds a record.
    #[display(fmt = "attendance for {} on {} already exists", employee_id, date)]
    DuplicateKey {
        employee_id: String,
        date: NaiveDate,
    },
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
    #[display(fmt = "invalid persisted attendance data: {}", _0)]
    InvalidData(String),
    #[display(fmt = "attendance store lock poisoned")]
    Poisoned,
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            Self::DuplicateKey { .. } | Self::InvalidData(_) | Self::Poisoned => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        Self::Database(value)
    }
}

/// Errors returned by the attendance service.
///
/// Display output of the two domain variants doubles as the client-facing
/// message; store failures are reported to clients generically.
#[derive(Debug, Display)]
pub enum AttendanceError {
    #[display(fmt = "Employee not found")]
    EmployeeNotFound { employee_id: String },

    #[display(fmt = "Attendance already marked for this date")]
    DuplicateAttendance {
        employee_id: String,
        date: NaiveDate,
    },

    #[display(fmt = "{}", _0)]
    Store(StoreError),
}

impl std::error::Error for AttendanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AttendanceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmployeeNotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateAttendance { .. } => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Store(err) => {
                tracing::error!(error = %err, "Attendance store failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let not_found = AttendanceError::EmployeeNotFound {
            employee_id: "E2".into(),
        };
        let duplicate = AttendanceError::DuplicateAttendance {
            employee_id: "E1".into(),
            date: day(),
        };
        let store = AttendanceError::Store(StoreError::Poisoned);

        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn store_failure_body_hides_cause() {
        let err = AttendanceError::Store(StoreError::InvalidData("bad row".into()));
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json, json!({ "message": "Internal Server Error" }));
    }

    #[actix_web::test]
    async fn duplicate_body_carries_message() {
        let err = AttendanceError::DuplicateAttendance {
            employee_id: "E1".into(),
            date: day(),
        };
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            json,
            json!({ "message": "Attendance already marked for this date" })
        );
    }

    #[test]
    fn store_error_exposes_database_source() {
        use std::error::Error;

        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(err.source().is_some());
        assert!(StoreError::Poisoned.source().is_none());
    }
}
