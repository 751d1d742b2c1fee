#![forbid(unsafe_code)]

//! Per-field validation rules.
//!
//! | Field | Accepts | Message |
//! |-------|---------|---------|
//! | name | `^[A-Za-z ]+$` | "Please enter a valid name" |
//! | email | any match of `S+@S+\.S+`, where `S` is neither whitespace nor U+FEFF | "Please enter a valid email" |
//! | phone number | exactly ten ASCII digits | "Please enter a valid phone number" |
//! | message | anything | never fails |
//!
//! Patterns are compiled once per process.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::form::Field;

pub const NAME_MESSAGE: &str = "Please enter a valid name";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("invalid name regex"));

// Unanchored: "x a@b.c y" passes because it contains a match. U+FEFF is
// not Unicode whitespace but still counts as a separator here.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s\u{FEFF}]+@[^\s\u{FEFF}]+\.[^\s\u{FEFF}]+").expect("invalid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("invalid phone regex"));

/// A failed rule: a stable code plus the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    code: &'static str,
    message: &'static str,
}

impl ValidationError {
    pub const fn new(code: &'static str, message: &'static str) -> Self {
        Self { code, message }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of running one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(err) => Err(err),
        }
    }
}

/// A pure rule over a field's text.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &str) -> ValidationResult;

    /// Message reported on failure; empty for rules that never fail.
    fn error_message(&self) -> &str;
}

/// Valid when the pattern matches somewhere in the value.
pub struct PatternValidator {
    pattern: &'static LazyLock<Regex>,
    error: ValidationError,
}

impl PatternValidator {
    pub const fn new(pattern: &'static LazyLock<Regex>, error: ValidationError) -> Self {
        Self { pattern, error }
    }
}

impl Validator for PatternValidator {
    fn validate(&self, value: &str) -> ValidationResult {
        if self.pattern.is_match(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.error)
        }
    }

    fn error_message(&self) -> &str {
        self.error.message
    }
}

/// Accepts everything, including the empty string.
pub struct AlwaysValid;

impl Validator for AlwaysValid {
    fn validate(&self, _value: &str) -> ValidationResult {
        ValidationResult::Valid
    }

    fn error_message(&self) -> &str {
        ""
    }
}

static NAME_RULE: PatternValidator =
    PatternValidator::new(&NAME_RE, ValidationError::new("invalid_name", NAME_MESSAGE));
static EMAIL_RULE: PatternValidator =
    PatternValidator::new(&EMAIL_RE, ValidationError::new("invalid_email", EMAIL_MESSAGE));
static PHONE_RULE: PatternValidator =
    PatternValidator::new(&PHONE_RE, ValidationError::new("invalid_phone", PHONE_MESSAGE));
static MESSAGE_RULE: AlwaysValid = AlwaysValid;

/// The rule applied to `field`.
pub fn validator_for(field: Field) -> &'static dyn Validator {
    match field {
        Field::Name => &NAME_RULE,
        Field::Email => &EMAIL_RULE,
        Field::PhoneNumber => &PHONE_RULE,
        Field::Message => &MESSAGE_RULE,
    }
}

/// Run the rule for `field` against `value`.
pub fn validate(field: Field, value: &str) -> ValidationResult {
    validator_for(field).validate(value)
}
