//! Shallow form validation for UX feedback.
//!
//! The server owns every real invariant (uniqueness, referential integrity,
//! status transitions). These checks only catch empty or malformed input
//! before a request is sent.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::ai::ProtocolExtractionRequest;
use crate::models::patient::ConsentRequest;
use crate::models::protocol::{ProtocolCreate, ProtocolStepCreate};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\d@$!%*?&]{8,}$").expect("valid password regex"));

const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub const PASSWORD_RULE: &str = "Password must be at least 8 characters and include an uppercase \
letter, a lowercase letter, a number, and a special character (@$!%*?&)";

const RESEARCH_TEXT_MIN: usize = 100;
const RESEARCH_TEXT_MAX: usize = 50_000;

/// A single field-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level errors in the order they were found. At most one error is
/// kept per field; the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    /// Record the outcome of a single field check.
    pub fn check(&mut self, result: Result<(), FieldError>) {
        if let Err(e) = result {
            self.add(e.field, e.message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

fn field_error(field: &str, message: impl Into<String>) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ── Field checks ────────────────────────────────────────────────────────────

pub fn required(field: &str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(field_error(field, "This field is required"));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), FieldError> {
    required(field, value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(field_error(field, "Please enter a valid email address"));
    }
    Ok(())
}

pub fn password(field: &str, value: &str) -> Result<(), FieldError> {
    required(field, value)?;
    let complex = PASSWORD_CHARSET_RE.is_match(value)
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if !complex {
        return Err(field_error(field, PASSWORD_RULE));
    }
    Ok(())
}

fn positive(field: &str, value: Option<i32>) -> Result<(), FieldError> {
    match value {
        Some(v) if v <= 0 => Err(field_error(field, "Must be greater than zero")),
        _ => Ok(()),
    }
}

// ── Forms ───────────────────────────────────────────────────────────────────

pub fn validate_login(email_value: &str, password_value: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    errors.check(email("email", email_value));
    errors.check(required("password", password_value));
    errors.into_result()
}

pub fn validate_register(
    email_value: &str,
    password_value: &str,
    confirm_value: &str,
) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    errors.check(email("email", email_value));
    errors.check(password("password", password_value));
    errors.check(required("confirm_password", confirm_value));
    if password_value != confirm_value {
        errors.add("confirm_password", "Passwords do not match");
    }
    errors.into_result()
}

pub fn validate_protocol_form(form: &ProtocolCreate) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    errors.check(required("name", &form.name));
    errors.check(required("version", &form.version));
    errors.check(required("condition_treated", &form.condition_treated));
    errors.check(positive("duration_weeks", form.duration_weeks));
    errors.check(positive("total_sessions", form.total_sessions));
    errors.into_result()
}

pub fn validate_step_form(form: &ProtocolStepCreate) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    errors.check(required("title", &form.title));
    errors.check(positive("sequence_order", Some(form.sequence_order)));
    errors.check(positive("duration_minutes", form.duration_minutes));
    errors.into_result()
}

pub fn validate_consent(form: &ConsentRequest) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    errors.check(required("signature", &form.signature));
    if !form.agreed {
        errors.add("agreed", "You must agree to the consent terms");
    }
    errors.into_result()
}

pub fn validate_extraction_request(form: &ProtocolExtractionRequest) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    let len = form.research_text.chars().count();
    if !(RESEARCH_TEXT_MIN..=RESEARCH_TEXT_MAX).contains(&len) {
        errors.add(
            "research_text",
            format!("Research text must be between {RESEARCH_TEXT_MIN} and {RESEARCH_TEXT_MAX} characters"),
        );
    }
    errors.check(required("therapy_type", &form.therapy_type));
    errors.check(required("condition", &form.condition));
    errors.into_result()
}
