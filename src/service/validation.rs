use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ValidationErrors;

/// Local part, `@`, dotted domain with an alphabetic TLD.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

pub const REQUIRED: &str = "Required";

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The string held by a required field. A missing field records
/// `Required`, any other JSON type records a type mismatch.
pub fn required_string<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a Value>,
) -> Option<&'a str> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            errors.add(
                field,
                format!("Expected string, received {}", type_name(other)),
            );
            None
        }
    }
}

/// Trimmed, non-empty text of a required field; `blank` is recorded otherwise.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&Value>,
    blank: &str,
) -> Option<String> {
    let text = required_string(errors, field, value)?.trim();
    if text.is_empty() {
        errors.add(field, blank);
        return None;
    }
    Some(text.to_string())
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_REGEX.is_match(email)
}

/// Canonical hyphenated lower-case form of a UUID.
pub fn parse_identifier(raw: &str) -> Option<String> {
    Uuid::parse_str(raw.trim())
        .ok()
        .map(|id| id.hyphenated().to_string())
}
