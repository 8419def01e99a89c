use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceStatus;

/// PRESENT total for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttendanceSummary {
    /// Internal id of the employee
    #[schema(example = "6f1c2b1e-3f43-4a53-9a55-8d7e3c1f2a10")]
    pub employee_id: String,
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 12)]
    pub total_present: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = 25)]
    pub total_employees: i64,
    #[schema(example = 20)]
    pub present_today: i64,
    #[schema(example = 3)]
    pub absent_today: i64,
}

/// Attendance row count for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub status: AttendanceStatus,
    pub count: i64,
}
