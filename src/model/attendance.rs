use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::model::employee::Employee;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    #[schema(example = "0c7d2f4e-5a8b-4c1d-9e3f-2b6a8d4c1e90")]
    pub id: String,

    /// Internal id of the employee
    #[schema(example = "6f1c2b1e-3f43-4a53-9a55-8d7e3c1f2a10")]
    pub employee_id: String,

    #[schema(example = "2024-01-15T00:00:00", value_type = String, format = "date-time")]
    pub date: NaiveDateTime,

    pub status: AttendanceStatus,

    #[schema(example = "2024-01-15T09:30:00.000Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithEmployee {
    pub id: String,
    pub employee_id: String,
    #[schema(example = "2024-01-15T00:00:00", value_type = String, format = "date-time")]
    pub date: NaiveDateTime,
    pub status: AttendanceStatus,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    pub employee: Employee,
}

impl AttendanceWithEmployee {
    pub fn new(record: Attendance, employee: Employee) -> Self {
        Self {
            id: record.id,
            employee_id: record.employee_id,
            date: record.date,
            status: record.status,
            created_at: record.created_at,
            employee,
        }
    }
}

/// Loose JSON fields, checked by the attendance validator.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendance {
    #[schema(example = "6f1c2b1e-3f43-4a53-9a55-8d7e3c1f2a10", value_type = String)]
    pub employee_id: Option<serde_json::Value>,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: Option<serde_json::Value>,
    #[schema(example = "PRESENT", value_type = String)]
    pub status: Option<serde_json::Value>,
}

/// Query string of the listing endpoint. Unusable values are ignored.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AttendanceQuery {
    /// Internal id of the employee
    pub employee_id: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD` or date-time
    pub from: Option<String>,
    /// Inclusive upper bound; a bare date covers the whole day
    pub to: Option<String>,
}

impl AttendanceQuery {
    /// A key given more than once is not a single value and counts as absent.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            values.entry(key).or_default().push(value);
        }

        let mut single = |key: &str| match values.remove(key) {
            Some(mut found) if found.len() == 1 => found.pop(),
            _ => None,
        };

        Self {
            employee_id: single("employeeId"),
            from: single("from"),
            to: single("to"),
        }
    }
}

impl From<&AttendanceQuery> for AttendanceFilter {
    fn from(query: &AttendanceQuery) -> Self {
        Self {
            employee_id: query
                .employee_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            from: query
                .from
                .as_deref()
                .and_then(DateInput::parse)
                .map(|d| d.value),
            to: query
                .to
                .as_deref()
                .and_then(DateInput::parse)
                .map(DateInput::upper_bound),
        }
    }
}

/// Validated input for a new attendance record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: NaiveDateTime,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    pub fn into_attendance(self, id: String, created_at: DateTime<Utc>) -> Attendance {
        Attendance {
            id,
            employee_id: self.employee_id,
            date: self.date,
            status: self.status,
            created_at,
        }
    }
}

/// Listing filter. Every bound is optional and inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

/// A parsed date input. Date-only values sit at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInput {
    pub value: NaiveDateTime,
    pub date_only: bool,
}

impl DateInput {
    /// Accepts `YYYY-MM-DD`, RFC 3339, and naive `YYYY-MM-DDTHH:MM:SS[.fff]`.
    /// Zoned values are converted to server local time.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(Self {
                value: date.and_time(NaiveTime::MIN),
                date_only: true,
            });
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self {
                value: dt.with_timezone(&Local).naive_local(),
                date_only: false,
            });
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|value| Self {
                value,
                date_only: false,
            })
    }

    /// Inclusive upper bound: a bare date covers its whole day.
    pub fn upper_bound(self) -> NaiveDateTime {
        if self.date_only {
            DayWindow::of(self.value.date()).end
        } else {
            self.value
        }
    }
}

/// One calendar day, 00:00:00.000 through 23:59:59.999 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayWindow {
    pub fn of(day: NaiveDate) -> Self {
        let start = day.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(1) - Duration::milliseconds(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_uses_upper_case_everywhere() {
        assert_eq!(AttendanceStatus::Present.to_string(), "PRESENT");
        assert_eq!(
            AttendanceStatus::from_str("ABSENT").unwrap(),
            AttendanceStatus::Absent
        );
        assert!(AttendanceStatus::from_str("present").is_err());
        assert_eq!(
            serde_json::to_value(AttendanceStatus::Absent).unwrap(),
            "ABSENT"
        );
    }

    #[test]
    fn date_only_input_lands_on_midnight() {
        let parsed = DateInput::parse("2024-01-15").unwrap();
        assert!(parsed.date_only);
        assert_eq!(parsed.value, ymd(2024, 1, 15).and_time(NaiveTime::MIN));
        assert_eq!(
            parsed.upper_bound(),
            ymd(2024, 1, 15).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn naive_date_time_input_keeps_its_time() {
        let parsed = DateInput::parse("2024-01-15T10:30:00").unwrap();
        assert!(!parsed.date_only);
        assert_eq!(
            parsed.value,
            ymd(2024, 1, 15).and_hms_opt(10, 30, 0).unwrap()
        );
        assert_eq!(parsed.upper_bound(), parsed.value);
    }

    #[test]
    fn rfc3339_input_is_accepted() {
        assert!(DateInput::parse("2024-01-15T10:30:00Z").is_some());
        assert!(DateInput::parse("2024-01-15T10:30:00.250+02:00").is_some());
    }

    #[test]
    fn garbage_and_impossible_dates_are_rejected() {
        assert!(DateInput::parse("").is_none());
        assert!(DateInput::parse("   ").is_none());
        assert!(DateInput::parse("not-a-date").is_none());
        assert!(DateInput::parse("2024-02-30").is_none());
        assert!(DateInput::parse("2024-13-01").is_none());
    }

    #[test]
    fn day_window_is_inclusive_on_both_ends() {
        let window = DayWindow::of(ymd(2024, 1, 15));
        assert_eq!(window.start, ymd(2024, 1, 15).and_time(NaiveTime::MIN));
        assert_eq!(
            window.end,
            ymd(2024, 1, 15).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
        assert!(window.end < ymd(2024, 1, 16).and_time(NaiveTime::MIN));
    }

    #[test]
    fn query_with_unusable_values_yields_an_open_filter() {
        let query = AttendanceQuery {
            employee_id: Some("  ".into()),
            from: Some("yesterday".into()),
            to: Some("2024-99-99".into()),
        };
        assert_eq!(AttendanceFilter::from(&query), AttendanceFilter::default());
    }

    #[test]
    fn repeated_query_keys_are_dropped() {
        let pairs = [
            ("from", "2024-01-01"),
            ("from", "2024-02-01"),
            ("to", "2024-01-31"),
            ("status", "PRESENT"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let query = AttendanceQuery::from_pairs(pairs);
        assert_eq!(query.from, None);
        assert_eq!(query.to.as_deref(), Some("2024-01-31"));
        assert_eq!(query.employee_id, None);
    }

    #[test]
    fn query_bounds_cover_whole_days() {
        let query = AttendanceQuery {
            employee_id: Some("emp-1".into()),
            from: Some("2024-01-10".into()),
            to: Some("2024-01-15".into()),
        };
        let filter = AttendanceFilter::from(&query);

        assert_eq!(filter.employee_id.as_deref(), Some("emp-1"));
        assert_eq!(filter.from, Some(ymd(2024, 1, 10).and_time(NaiveTime::MIN)));
        assert_eq!(filter.to, Some(DayWindow::of(ymd(2024, 1, 15)).end));
    }
}
