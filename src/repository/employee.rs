use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, error};

use crate::model::employee::Employee;
use crate::repository::{EmployeeRepository, RepositoryError};

// `seq` is insertion order; `created_at` only has millisecond precision.
const SELECT_EMPLOYEES: &str = r#"
    SELECT id, employee_code, full_name, email, department, created_at
    FROM employees
    ORDER BY created_at DESC, seq DESC
"#;

#[derive(Clone)]
pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    async fn insert(&self, employee: &Employee) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO employees
            (id, employee_code, full_name, email, department, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.employee_code)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let e = RepositoryError::from(e);
            if matches!(e, RepositoryError::Database(_)) {
                error!(error = %e, "Failed to insert employee");
            }
            e
        })?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let employees = sqlx::query_as::<_, Employee>(SELECT_EMPLOYEES)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch employees");
            RepositoryError::from(e)
        })?;

        debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    async fn delete(&self, id: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = id, "Failed to delete employee");
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count employees");
                RepositoryError::from(e)
            })
    }
}
