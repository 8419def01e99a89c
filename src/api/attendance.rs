use actix_web::{HttpResponse, web};

use crate::error::AppError;
use crate::model::attendance::{AttendanceFilter, AttendanceQuery, CreateAttendance};
use crate::service::AttendanceService;

/// Record attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = crate::model::attendance::Attendance),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": {
                "formErrors": [],
                "fieldErrors": { "date": ["Invalid date"] }
            }
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, AppError> {
    let record = service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

/// List attendance, latest date first
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Matching attendance records", body = [crate::model::attendance::AttendanceWithEmployee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    service: web::Data<AttendanceService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let query = AttendanceQuery::from_pairs(query.into_inner());
    let filter = AttendanceFilter::from(&query);
    let records = service.list(&filter).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// PRESENT totals per employee
#[utoipa::path(
    get,
    path = "/api/attendance/summary/by-employee",
    responses(
        (status = 200, description = "One row per employee", body = [crate::model::summary::EmployeeAttendanceSummary]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn summary_by_employee(
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    let summary = service.summary_by_employee().await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Today's headcount
#[utoipa::path(
    get,
    path = "/api/attendance/dashboard-summary",
    responses(
        (status = 200, description = "Counts for the current day", body = crate::model::summary::DashboardSummary),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn dashboard_summary(
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    let summary = service.dashboard_summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}
