//! In-process stand-in for the MySQL repositories, used by tests.
//! Mirrors the schema's constraints: unique employee code and email,
//! attendance foreign key, cascade on employee delete.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::UniqueField;
use crate::model::attendance::{
    Attendance, AttendanceFilter, AttendanceStatus, AttendanceWithEmployee,
};
use crate::model::employee::Employee;
use crate::model::summary::StatusCount;
use crate::repository::{AttendanceRepository, EmployeeRepository, RepositoryError};

fn matches_filter(filter: &AttendanceFilter, record: &Attendance) -> bool {
    filter
        .employee_id
        .as_deref()
        .is_none_or(|id| record.employee_id == id)
        && filter.from.is_none_or(|from| record.date >= from)
        && filter.to.is_none_or(|to| record.date <= to)
}

#[derive(Default)]
struct State {
    employees: Vec<Employee>,
    attendance: Vec<Attendance>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory store poisoned")
    }

    pub fn attendance_len(&self) -> usize {
        self.lock().attendance.len()
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn insert(&self, employee: &Employee) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state
            .employees
            .iter()
            .any(|e| e.employee_code == employee.employee_code)
        {
            return Err(RepositoryError::UniqueViolation(UniqueField::EmployeeId));
        }
        if state.employees.iter().any(|e| e.email == employee.email) {
            return Err(RepositoryError::UniqueViolation(UniqueField::Email));
        }
        state.employees.push(employee.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let mut employees: Vec<Employee> = self.lock().employees.iter().rev().cloned().collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn delete(&self, id: &str) -> Result<u64, RepositoryError> {
        let mut state = self.lock();
        let before = state.employees.len();
        state.employees.retain(|e| e.id != id);
        let removed = (before - state.employees.len()) as u64;
        if removed > 0 {
            state.attendance.retain(|a| a.employee_id != id);
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.lock().employees.len() as i64)
    }
}

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn insert(&self, record: &Attendance) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if !state.employees.iter().any(|e| e.id == record.employee_id) {
            return Err(RepositoryError::ForeignKeyViolation);
        }
        state.attendance.push(record.clone());
        Ok(())
    }

    async fn find(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceWithEmployee>, RepositoryError> {
        let state = self.lock();
        let employees: HashMap<&str, &Employee> =
            state.employees.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut rows: Vec<AttendanceWithEmployee> = state
            .attendance
            .iter()
            .rev()
            .filter(|a| matches_filter(filter, a))
            .filter_map(|a| {
                employees
                    .get(a.employee_id.as_str())
                    .map(|e| AttendanceWithEmployee::new(a.clone(), (*e).clone()))
            })
            .collect();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(rows)
    }

    async fn count_present_by_employee(&self) -> Result<Vec<(String, i64)>, RepositoryError> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for record in self
            .lock()
            .attendance
            .iter()
            .filter(|a| a.status == AttendanceStatus::Present)
        {
            *counts.entry(record.employee_id.clone()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_status_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<StatusCount>, RepositoryError> {
        let mut counts: HashMap<_, i64> = HashMap::new();
        for record in self
            .lock()
            .attendance
            .iter()
            .filter(|a| start <= a.date && a.date <= end)
        {
            *counts.entry(record.status).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }
}
