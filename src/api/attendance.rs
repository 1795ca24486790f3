use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::error::AttendanceError;
use crate::model::attendance::{AttendanceList, AttendanceRecord, AttendanceStatus, PresenceSummary};
use crate::service::AttendanceService;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendance {
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "PRESENT")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateFilter {
    /// Only return records for this day (YYYY-MM-DD)
    #[param(value_type = Option<String>, example = "2024-01-01")]
    pub date: Option<NaiveDate>,
}

/// Mark attendance for an employee on a day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = Object, example = json!({
            "message": "Attendance marked successfully"
        })),
        (status = 400, description = "Malformed payload"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 409, description = "Attendance already marked for this date", body = Object, example = json!({
            "message": "Attendance already marked for this date"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, AttendanceError> {
    let MarkAttendance {
        employee_id,
        date,
        status,
    } = payload.into_inner();

    service.mark_attendance(&employee_id, date, status).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Attendance marked successfully"
    })))
}

/// List attendance, optionally restricted to one day
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(DateFilter),
    responses(
        (status = 200, description = "Matching attendance records", body = AttendanceList),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn filter_by_date(
    service: web::Data<AttendanceService>,
    query: web::Query<DateFilter>,
) -> Result<HttpResponse, AttendanceError> {
    let list = service.filter_by_date(query.date).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Attendance history of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Attendance records of the employee", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_by_employee(
    service: web::Data<AttendanceService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = path.into_inner();
    let records = service.get_by_employee(&employee_id).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// PRESENT-day totals for every employee
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    responses(
        (status = 200, description = "Present days per employee", body = [PresenceSummary]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn summary(service: web::Data<AttendanceService>) -> Result<HttpResponse, AttendanceError> {
    let totals = service.summary().await?;
    Ok(HttpResponse::Ok().json(totals))
}

/// PRESENT-day total for one employee
#[utoipa::path(
    get,
    path = "/api/attendance/summary/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Present days of the employee", body = PresenceSummary),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn employee_summary(
    service: web::Data<AttendanceService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AttendanceError> {
    let employee_id = path.into_inner();
    let total = service.employee_summary(&employee_id).await?;
    Ok(HttpResponse::Ok().json(total))
}
