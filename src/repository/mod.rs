pub mod attendance;
pub mod employee;
#[cfg(test)]
pub mod memory;
pub mod sql;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use derive_more::Display;

use crate::error::{AppError, UniqueField};
use crate::model::attendance::{Attendance, AttendanceFilter, AttendanceWithEmployee};
use crate::model::employee::Employee;
use crate::model::summary::StatusCount;

pub use attendance::MySqlAttendanceRepository;
pub use employee::MySqlEmployeeRepository;

/// Store outcomes the services care about.
#[derive(Debug, Display)]
pub enum RepositoryError {
    #[display(fmt = "unique constraint violated on {}", _0)]
    UniqueViolation(UniqueField),

    #[display(fmt = "foreign key constraint violated")]
    ForeignKeyViolation,

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for RepositoryError {}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                if let Some(field) = sql::unique_field_from_message(db_err.message()) {
                    return RepositoryError::UniqueViolation(field);
                }
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKeyViolation;
            }
        }
        RepositoryError::Database(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::UniqueViolation(field) => AppError::Conflict(field),
            // The only foreign key points at employees
            RepositoryError::ForeignKeyViolation => AppError::NotFound("Employee"),
            RepositoryError::Database(e) => AppError::Database(e),
        }
    }
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn insert(&self, employee: &Employee) -> Result<(), RepositoryError>;

    /// Newest first.
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: &str) -> Result<u64, RepositoryError>;

    async fn count(&self) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn insert(&self, record: &Attendance) -> Result<(), RepositoryError>;

    /// Joined with the owning employee, latest date first.
    async fn find(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceWithEmployee>, RepositoryError>;

    /// PRESENT rows per employee id. Employees without any are absent from the result.
    async fn count_present_by_employee(&self) -> Result<Vec<(String, i64)>, RepositoryError>;

    /// Rows per status with `date` in `[start, end]`.
    async fn count_by_status_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<StatusCount>, RepositoryError>;
}
