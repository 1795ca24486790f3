use crate::api::attendance::MarkAttendance;
use crate::model::attendance::{AttendanceList, AttendanceRecord, AttendanceStatus, PresenceSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Attendance API",
        version = "0.1.0",
        description = r#"
## Attendance tracking

Daily attendance for employees registered in the HR directory.

### Rules
- One status per employee per calendar day (`PRESENT` or `ABSENT`).
- Attendance can only be marked for an existing employee.
- Read endpoints never check whether the employee exists.

### Response Format
- JSON bodies; errors are `{"message": "..."}`
- Record ids are strings

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::mark_attendance,
        crate::api::attendance::filter_by_date,
        crate::api::attendance::get_by_employee,
        crate::api::attendance::summary,
        crate::api::attendance::employee_summary
    ),
    components(
        schemas(
            MarkAttendance,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceList,
            PresenceSummary
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
