use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "6f1c2b1e-3f43-4a53-9a55-8d7e3c1f2a10",
        "employeeId": "EMP-001",
        "fullName": "Jane Doe",
        "email": "jane.doe@company.com",
        "department": "Engineering",
        "createdAt": "2024-01-15T09:30:00.000Z"
    })
)]
pub struct Employee {
    #[schema(example = "6f1c2b1e-3f43-4a53-9a55-8d7e3c1f2a10")]
    pub id: String,

    /// Human-assigned employee code
    #[serde(rename = "employeeId")]
    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "Jane Doe")]
    pub full_name: String,

    #[schema(example = "jane.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(
        example = "2024-01-15T09:30:00.000Z",
        value_type = String,
        format = "date-time"
    )]
    pub created_at: DateTime<Utc>,
}

/// Request body for creating an employee. Fields are loose JSON so that
/// missing or wrongly typed ones are reported per field instead of failing
/// to decode.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: Option<serde_json::Value>,
    #[schema(example = "Jane Doe", value_type = String)]
    pub full_name: Option<serde_json::Value>,
    #[schema(example = "jane.doe@company.com", format = "email", value_type = String)]
    pub email: Option<serde_json::Value>,
    #[schema(example = "Engineering", value_type = String)]
    pub department: Option<serde_json::Value>,
}

/// Validated input for a new employee.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl NewEmployee {
    pub fn into_employee(self, id: String, created_at: DateTime<Utc>) -> Employee {
        Employee {
            id,
            employee_code: self.employee_code,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_wire_names() {
        let employee = NewEmployee {
            employee_code: "EMP001".into(),
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            department: "Eng".into(),
        }
        .into_employee(
            "id-1".into(),
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        );

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["id"], "id-1");
        assert_eq!(json["employeeId"], "EMP001");
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["department"], "Eng");
        assert!(json.get("employeeCode").is_none());
        assert!(json["createdAt"].as_str().unwrap().starts_with("2024-01-15T08:00:00"));
    }
}
