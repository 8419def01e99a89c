use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, NaiveDate, SubsecRound, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{AppError, ValidationErrors};
use crate::model::attendance::{
    Attendance, AttendanceFilter, AttendanceStatus, AttendanceWithEmployee, CreateAttendance,
    DateInput, DayWindow, NewAttendance,
};
use crate::model::summary::{DashboardSummary, EmployeeAttendanceSummary};
use crate::repository::{AttendanceRepository, EmployeeRepository};
use crate::service::validation::{parse_identifier, required_string};

pub struct AttendanceService {
    attendance: Arc<dyn AttendanceRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl AttendanceService {
    pub fn new(
        attendance: Arc<dyn AttendanceRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            attendance,
            employees,
        }
    }

    /// Does not look for an existing record on the same day.
    #[instrument(name = "attendance_create", skip(self, input))]
    pub async fn create(&self, input: CreateAttendance) -> Result<Attendance, AppError> {
        let new_record = validate_attendance(input)?;

        let record =
            new_record.into_attendance(Uuid::new_v4().to_string(), Utc::now().trunc_subsecs(3));
        self.attendance.insert(&record).await?;

        info!(
            id = %record.id,
            employee_id = %record.employee_id,
            date = %record.date,
            status = %record.status,
            "Attendance recorded"
        );
        Ok(record)
    }

    pub async fn list(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceWithEmployee>, AppError> {
        debug!(?filter, "Listing attendance");
        Ok(self.attendance.find(filter).await?)
    }

    /// Two independent reads merged by employee id. Not atomic against
    /// concurrent writes.
    pub async fn summary_by_employee(&self) -> Result<Vec<EmployeeAttendanceSummary>, AppError> {
        let (employees, present) = futures::try_join!(
            self.employees.find_all(),
            self.attendance.count_present_by_employee()
        )?;

        let present: HashMap<String, i64> = present.into_iter().collect();

        Ok(employees
            .into_iter()
            .map(|e| EmployeeAttendanceSummary {
                total_present: present.get(&e.id).copied().unwrap_or(0),
                employee_id: e.id,
                employee_code: e.employee_code,
                full_name: e.full_name,
                department: e.department,
            })
            .collect())
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, AppError> {
        self.dashboard_summary_for(Local::now().date_naive()).await
    }

    /// Same as [`Self::dashboard_summary`] for an explicit day.
    pub async fn dashboard_summary_for(&self, day: NaiveDate) -> Result<DashboardSummary, AppError> {
        let window = DayWindow::of(day);

        let (total_employees, counts) = futures::try_join!(
            self.employees.count(),
            self.attendance
                .count_by_status_between(window.start, window.end)
        )?;

        let mut summary = DashboardSummary {
            total_employees,
            ..Default::default()
        };
        for c in counts {
            match c.status {
                AttendanceStatus::Present => summary.present_today += c.count,
                AttendanceStatus::Absent => summary.absent_today += c.count,
            }
        }

        Ok(summary)
    }
}

pub fn validate_attendance(input: CreateAttendance) -> Result<NewAttendance, AppError> {
    let mut errors = ValidationErrors::new();

    let employee_id = required_string(&mut errors, "employeeId", input.employee_id.as_ref())
        .and_then(|raw| {
            let id = parse_identifier(raw);
            if id.is_none() {
                errors.add("employeeId", "Invalid employee ID");
            }
            id
        });

    let date = required_string(&mut errors, "date", input.date.as_ref()).and_then(|raw| {
        let date = DateInput::parse(raw).map(|d| d.value);
        if date.is_none() {
            errors.add("date", "Invalid date");
        }
        date
    });

    let status = required_string(&mut errors, "status", input.status.as_ref()).and_then(|raw| {
        let status = AttendanceStatus::from_str(raw).ok();
        if status.is_none() {
            errors.add(
                "status",
                format!("Invalid enum value. Expected 'PRESENT' | 'ABSENT', received '{raw}'"),
            );
        }
        status
    });

    match (employee_id, date, status) {
        (Some(employee_id), Some(date), Some(status)) => Ok(NewAttendance {
            employee_id,
            date,
            status,
        }),
        _ => Err(AppError::Validation(errors)),
    }
}
