//! Field rules that screens run from `on_blur` or before submitting.
//!
//! The patch function only knows about required presence; format rules
//! live here and are opted into per field.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::FieldDescriptor;

use super::{ErrorsMap, is_falsy};

/// A blur-time rule. `Err` carries the message shown under the field.
pub type FieldRule = fn(&str) -> Result<(), String>;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn phone_regex() -> Option<&'static Regex> {
    PHONE
        .get_or_init(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").ok())
        .as_ref()
}

pub fn validate_email(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    match email_regex() {
        Some(regex) if regex.is_match(trimmed) => Ok(()),
        _ => Err("Please enter a valid email address".to_string()),
    }
}

/// At least eight characters with an upper-case letter, a lower-case letter
/// and a digit.
pub fn validate_password(input: &str) -> Result<(), String> {
    if input.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    let has_upper = input.chars().any(char::is_uppercase);
    let has_lower = input.chars().any(char::is_lowercase);
    let has_digit = input.chars().any(|c| c.is_ascii_digit());
    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err("Password needs upper-case, lower-case and numeric characters".to_string())
    }
}

pub fn validate_phone(input: &str) -> Result<(), String> {
    match phone_regex() {
        Some(regex) if regex.is_match(input.trim()) => Ok(()),
        _ => Err("Please enter a valid phone number".to_string()),
    }
}

pub fn validate_positive_number(input: &str) -> Result<(), String> {
    match input.trim().parse::<f64>() {
        Ok(number) if number > 0.0 && number.is_finite() => Ok(()),
        Ok(_) => Err("Must be greater than zero".to_string()),
        Err(_) => Err("Must be a number".to_string()),
    }
}

/// Runs the required rule over every descriptor against the current state,
/// flagging missing fields. Returns the number of fields that failed.
pub fn require_all<'a>(
    fields: impl IntoIterator<Item = &'a FieldDescriptor>,
    state: &Value,
    errors: &mut ErrorsMap,
) -> usize {
    let mut missing = 0;
    for field in fields {
        if !field.is_required {
            continue;
        }
        let empty = field.read_from(state).is_none_or(is_falsy);
        if empty {
            missing += 1;
            if !errors.contains(&field.key) {
                errors.flag(field.key.clone());
            }
        }
    }
    missing
}

/// Text form of a value as a rule sees it.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_rule_accepts_common_addresses() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("  first.last@shop.co.uk ").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }

    #[test]
    fn password_rule_checks_length_and_classes() {
        assert!(validate_password("Secret12").is_ok());
        assert!(validate_password("Sec12").is_err());
        assert!(validate_password("secret123").is_err());
        assert!(validate_password("SECRET123").is_err());
        assert!(validate_password("Secretive").is_err());
    }

    #[test]
    fn phone_rule_allows_separators() {
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("555-0100").is_ok());
        assert!(validate_phone("12").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn positive_numbers_only() {
        assert!(validate_positive_number("2.5").is_ok());
        assert!(validate_positive_number("0").is_err());
        assert!(validate_positive_number("x").is_err());
    }

    #[test]
    fn require_all_flags_missing_nested_fields() {
        let fields = [
            FieldDescriptor::text("name").parent("info").required(true),
            FieldDescriptor::email("email").parent("info").required(true),
            FieldDescriptor::text("notes"),
        ];
        let state = json!({"info": {"name": "Ada"}});
        let mut errors = ErrorsMap::new();
        assert_eq!(require_all(&fields, &state, &mut errors), 1);
        assert!(errors.contains("email"));
        assert!(!errors.contains("name"));
        assert!(!errors.contains("notes"));
    }

    #[test]
    fn require_all_keeps_existing_messages() {
        let fields = [FieldDescriptor::email("email").required(true)];
        let mut errors = ErrorsMap::new();
        errors.set_message("email", "Please enter a valid email address");
        require_all(&fields, &json!({}), &mut errors);
        assert_eq!(
            errors.get("email").and_then(|e| e.message()),
            Some("Please enter a valid email address")
        );
    }
}
