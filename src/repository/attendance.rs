use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::MySqlPool;
use tracing::{debug, error};

use crate::model::attendance::{
    Attendance, AttendanceFilter, AttendanceStatus, AttendanceWithEmployee,
};
use crate::model::employee::Employee;
use crate::model::summary::StatusCount;
use crate::repository::sql::{SqlValue, WhereClause, bind_values};
use crate::repository::{AttendanceRepository, RepositoryError};

const ORDER_BY_LATEST: &str = "ORDER BY a.date DESC, a.created_at DESC, a.seq DESC";

#[derive(Clone)]
pub struct MySqlAttendanceRepository {
    pool: MySqlPool,
}

impl MySqlAttendanceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// One attendance row joined with its employee.
#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: String,
    employee_id: String,
    date: NaiveDateTime,
    status: String,
    created_at: DateTime<Utc>,
    employee_code: String,
    full_name: String,
    email: String,
    department: String,
    employee_created_at: DateTime<Utc>,
}

impl TryFrom<AttendanceRow> for AttendanceWithEmployee {
    type Error = sqlx::Error;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        let employee = Employee {
            id: row.employee_id.clone(),
            employee_code: row.employee_code,
            full_name: row.full_name,
            email: row.email,
            department: row.department,
            created_at: row.employee_created_at,
        };
        let record = Attendance {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status,
            created_at: row.created_at,
        };
        Ok(AttendanceWithEmployee::new(record, employee))
    }
}

fn parse_status(raw: &str) -> Result<AttendanceStatus, sqlx::Error> {
    AttendanceStatus::from_str(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// Typed filter → SQL conditions over the `a` (attendance) alias.
fn where_clause(filter: &AttendanceFilter) -> WhereClause {
    let mut clause = WhereClause::new();

    if let Some(employee_id) = &filter.employee_id {
        clause.push("a.employee_id = ?", SqlValue::String(employee_id.clone()));
    }
    if let Some(from) = filter.from {
        clause.push("a.date >= ?", SqlValue::DateTime(from));
    }
    if let Some(to) = filter.to {
        clause.push("a.date <= ?", SqlValue::DateTime(to));
    }

    clause
}

#[async_trait]
impl AttendanceRepository for MySqlAttendanceRepository {
    async fn insert(&self, record: &Attendance) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_id, date, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.employee_id)
        .bind(record.date)
        .bind(record.status.to_string())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let e = RepositoryError::from(e);
            if matches!(e, RepositoryError::Database(_)) {
                error!(error = %e, employee_id = %record.employee_id, "Failed to insert attendance");
            }
            e
        })?;

        Ok(())
    }

    async fn find(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceWithEmployee>, RepositoryError> {
        let clause = where_clause(filter);
        let data_sql = format!(
            r#"
            SELECT
                a.id,
                a.employee_id,
                a.date,
                a.status,
                a.created_at,
                e.employee_code,
                e.full_name,
                e.email,
                e.department,
                e.created_at AS employee_created_at
            FROM attendance a
            INNER JOIN employees e ON e.id = a.employee_id
            {}
            {ORDER_BY_LATEST}
            "#,
            clause.sql()
        );
        debug!(sql = %data_sql, bindings = ?clause.values(), "Fetching attendance");

        let query = bind_values(
            sqlx::query_as::<_, AttendanceRow>(&data_sql),
            clause.into_values(),
        );

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, sql = %data_sql, "Failed to fetch attendance");
            RepositoryError::from(e)
        })?;

        rows.into_iter()
            .map(|row| AttendanceWithEmployee::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    async fn count_present_by_employee(&self) -> Result<Vec<(String, i64)>, RepositoryError> {
        sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT employee_id, COUNT(*) AS total
            FROM attendance
            WHERE status = ?
            GROUP BY employee_id
            "#,
        )
        .bind(AttendanceStatus::Present.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count attendance by employee");
            RepositoryError::from(e)
        })
    }

    async fn count_by_status_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<StatusCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*) AS total
            FROM attendance
            WHERE date BETWEEN ? AND ?
            GROUP BY status
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, %start, %end, "Failed to count attendance by status");
            RepositoryError::from(e)
        })?;

        rows.into_iter()
            .map(|(status, count)| -> Result<StatusCount, RepositoryError> {
                Ok(StatusCount {
                    status: parse_status(&status)?,
                    count,
                })
            })
            .collect()
    }
}
