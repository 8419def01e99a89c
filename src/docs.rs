use crate::model::attendance::{
    Attendance, AttendanceStatus, AttendanceWithEmployee, CreateAttendance,
};
use crate::model::employee::{CreateEmployee, Employee};
use crate::model::summary::{DashboardSummary, EmployeeAttendanceSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small HR backend for tracking **employees** and their daily **attendance**.

### Features
- **Employees**: create, list (newest first), delete. Deleting an employee removes their attendance.
- **Attendance**: record `PRESENT` / `ABSENT` for a day, list with employee and date-range filters.
- **Summaries**: present-day totals per employee and today's dashboard counts.

### Errors
Every error body carries a `message`. Validation failures (400) add
`errors.formErrors` and `errors.fieldErrors`.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::delete_employee,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::summary_by_employee,
        crate::api::attendance::dashboard_summary
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            Attendance,
            AttendanceStatus,
            AttendanceWithEmployee,
            CreateAttendance,
            EmployeeAttendanceSummary,
            DashboardSummary
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
