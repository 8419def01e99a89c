use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, ValidationErrors};
use crate::model::employee::{CreateEmployee, Employee, NewEmployee};
use crate::repository::EmployeeRepository;
use crate::service::validation::{is_valid_email, required_string, required_text};

pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "employee_create", skip(self, input))]
    pub async fn create(&self, input: CreateEmployee) -> Result<Employee, AppError> {
        let new_employee = validate_employee(input)?;

        let employee =
            new_employee.into_employee(Uuid::new_v4().to_string(), Utc::now().trunc_subsecs(3));

        if let Err(e) = self.repo.insert(&employee).await {
            let e = AppError::from(e);
            if let AppError::Conflict(field) = &e {
                warn!(%field, employee_code = %employee.employee_code, "Employee rejected as duplicate");
            }
            return Err(e);
        }

        info!(id = %employee.id, employee_code = %employee.employee_code, "Employee created");
        Ok(employee)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.repo.find_all().await?)
    }

    #[instrument(name = "employee_delete", skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if self.repo.delete(id).await? == 0 {
            return Err(AppError::NotFound("Employee"));
        }

        info!("Employee deleted");
        Ok(())
    }
}

/// Every failing field is reported, not only the first.
pub fn validate_employee(input: CreateEmployee) -> Result<NewEmployee, AppError> {
    let mut errors = ValidationErrors::new();

    let employee_code = required_text(
        &mut errors,
        "employeeId",
        input.employee_id.as_ref(),
        "Employee ID is required",
    );
    let full_name = required_text(
        &mut errors,
        "fullName",
        input.full_name.as_ref(),
        "Full name is required",
    );
    let department = required_text(
        &mut errors,
        "department",
        input.department.as_ref(),
        "Department is required",
    );

    let email = required_string(&mut errors, "email", input.email.as_ref())
        .map(str::trim)
        .and_then(|email| {
            if is_valid_email(email) {
                Some(email.to_string())
            } else {
                errors.add("email", "Invalid email address");
                None
            }
        });

    match (employee_code, full_name, email, department) {
        (Some(employee_code), Some(full_name), Some(email), Some(department)) => Ok(NewEmployee {
            employee_code,
            full_name,
            email,
            department,
        }),
        _ => Err(AppError::Validation(errors)),
    }
}
