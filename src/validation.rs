//! Field checks applied to user input before it is submitted.
//!
//! Validation returns data; nothing here blocks a write by itself. The
//! coordinator never calls it, so callers check the report before submitting.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::{User, UserFormData, UserStatus};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

// Length is measured in UTF-16 code units, as browser form fields count it.
const NAME_MIN_UTF16_UNITS: usize = 2;

/// Unchecked user fields as they arrive from a form or another loose source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            status: Some(status.into()),
        }
    }
}

impl From<&User> for UserInput {
    fn from(user: &User) -> Self {
        Self::new(user.name.clone(), user.email.clone(), user.status.as_str())
    }
}

impl From<&UserFormData> for UserInput {
    fn from(form: &UserFormData) -> Self {
        Self::new(form.name.clone(), form.email.clone(), form.status.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Email must be a valid email address")]
    InvalidEmail,
    #[error("Status must be either active or inactive")]
    InvalidStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

/// Runs every check and collects all violations; it never stops at the first one.
pub fn validate(input: &UserInput) -> ValidationReport {
    let mut errors = Vec::new();

    let name_ok = input
        .name
        .as_deref()
        .is_some_and(|name| name.trim().encode_utf16().count() >= NAME_MIN_UTF16_UNITS);
    if !name_ok {
        errors.push(ValidationError::NameTooShort);
    }

    let email_ok = input
        .email
        .as_deref()
        .is_some_and(|email| !email.is_empty() && EMAIL_PATTERN.is_match(email));
    if !email_ok {
        errors.push(ValidationError::InvalidEmail);
    }

    if input.status.as_deref().and_then(UserStatus::parse).is_none() {
        errors.push(ValidationError::InvalidStatus);
    }

    ValidationReport::from_errors(errors)
}

/// Validates and converts into submittable form data.
pub fn parse_form(input: UserInput) -> Result<UserFormData, ValidationReport> {
    let report = validate(&input);
    match (input.name, input.email, input.status.as_deref().and_then(UserStatus::parse)) {
        (Some(name), Some(email), Some(status)) if report.is_valid => Ok(UserFormData { name, email, status }),
        _ => Err(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_well_formed_user() {
        let report = validate(&UserInput::new("New User", "new@example.com", "active"));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn reports_every_violation() {
        let report = validate(&UserInput::new("A", "bad", "x"));
        assert!(!report.is_valid);
        assert_eq!(
            report.messages(),
            vec![
                "Name must be at least 2 characters long",
                "Email must be a valid email address",
                "Status must be either active or inactive",
            ]
        );
    }

    #[test]
    fn missing_fields_fail() {
        let report = validate(&UserInput::default());
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn name_is_trimmed_before_counting() {
        let report = validate(&UserInput::new("  J  ", "j@x.io", "inactive"));
        assert_eq!(report.errors, vec![ValidationError::NameTooShort]);
        assert!(validate(&UserInput::new(" Jo ", "j@x.io", "inactive")).is_valid);
    }

    #[test]
    fn name_length_counts_utf16_units() {
        assert!(validate(&UserInput::new("😀", "j@x.io", "active")).is_valid);
        let report = validate(&UserInput::new(" é ", "j@x.io", "active"));
        assert_eq!(report.errors, vec![ValidationError::NameTooShort]);
    }

    #[test]
    fn email_shape() {
        for bad in ["", "a@b", "a b@c.d", "@c.d", "a@.d", "a@b.", "a@@b.c"] {
            let report = validate(&UserInput::new("Ann", bad, "active"));
            assert_eq!(report.errors, vec![ValidationError::InvalidEmail], "{bad:?}");
        }
        assert!(validate(&UserInput::new("Ann", "ann.lee@mail.example.org", "active")).is_valid);
    }

    #[test]
    fn status_is_case_sensitive() {
        let report = validate(&UserInput::new("Ann", "a@b.co", "Active"));
        assert_eq!(report.errors, vec![ValidationError::InvalidStatus]);
    }

    #[test]
    fn parse_form_converts_or_returns_the_report() {
        let form = parse_form(UserInput::new("Ann", "a@b.co", "inactive")).unwrap();
        assert_eq!(form.status, UserStatus::Inactive);

        let report = parse_form(UserInput::new("Ann", "nope", "inactive")).unwrap_err();
        assert_eq!(report.to_string(), "Email must be a valid email address");
    }
}
