use chrono::NaiveDateTime;
use sqlx::MySql;
use sqlx::mysql::MySqlArguments;
use sqlx::query::QueryAs;

use crate::error::UniqueField;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    DateTime(NaiveDateTime),
}

/// ===============================
/// WHERE clause container
/// ===============================
#[derive(Debug, Default)]
pub struct WhereClause {
    conditions: Vec<&'static str>,
    values: Vec<SqlValue>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// `condition` must hold exactly one `?` placeholder.
    pub fn push(&mut self, condition: &'static str, value: SqlValue) -> &mut Self {
        self.conditions.push(condition);
        self.values.push(value);
        self
    }

    pub fn sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}

/// Bind values in placeholder order.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, MySql, O, MySqlArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, MySql, O, MySqlArguments> {
    for value in values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
        };
    }
    query
}

/// MySQL names the violated key in the message:
/// `Duplicate entry 'x' for key 'employees.uq_employees_email'`.
pub fn unique_field_from_message(message: &str) -> Option<UniqueField> {
    if message.contains("uq_employees_employee_code") {
        Some(UniqueField::EmployeeId)
    } else if message.contains("uq_employees_email") {
        Some(UniqueField::Email)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_clause_renders_nothing() {
        let clause = WhereClause::new();
        assert_eq!(clause.sql(), "");
        assert!(clause.values().is_empty());
    }

    #[test]
    fn conditions_are_joined_in_order() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let mut clause = WhereClause::new();
        clause
            .push("a.employee_id = ?", SqlValue::String("emp-1".into()))
            .push("a.date >= ?", SqlValue::DateTime(from));

        assert_eq!(clause.sql(), "WHERE a.employee_id = ? AND a.date >= ?");
        assert_eq!(
            clause.into_values(),
            vec![SqlValue::String("emp-1".into()), SqlValue::DateTime(from)]
        );
    }

    #[test]
    fn duplicate_key_messages_map_to_fields() {
        assert_eq!(
            unique_field_from_message(
                "Duplicate entry 'EMP001' for key 'employees.uq_employees_employee_code'"
            ),
            Some(UniqueField::EmployeeId)
        );
        assert_eq!(
            unique_field_from_message("Duplicate entry 'a@b.co' for key 'uq_employees_email'"),
            Some(UniqueField::Email)
        );
        assert_eq!(
            unique_field_from_message("Duplicate entry 'x' for key 'PRIMARY'"),
            None
        );
    }
}
