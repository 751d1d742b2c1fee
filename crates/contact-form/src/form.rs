#![forbid(unsafe_code)]

//! Form state and the controller that mutates it.
//!
//! [`FormController`] owns the four field values, the current per-field
//! errors, and whether the summary dialog is open. It knows nothing about
//! terminals; the app model feeds it `change`, `blur`, `submit`, and
//! `close_summary` calls.
//!
//! Errors only move on blur and submit. Editing a field leaves its previous
//! message in place until the next validation of that field.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::validation::{ValidationResult, validate};

/// One of the four form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    PhoneNumber,
    Message,
}

impl Field {
    /// Display and tab order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::PhoneNumber, Field::Message];

    /// Stable identifier used in logs.
    pub const fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::PhoneNumber => "phoneNumber",
            Field::Message => "message",
        }
    }

    /// Label shown above the input.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Name *",
            Field::Email => "Email *",
            Field::PhoneNumber => "Phone Number *",
            Field::Message => "Message",
        }
    }

    /// Hint shown in the empty input.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Please enter your full name",
            Field::Email => "Please enter your email",
            Field::PhoneNumber => "Please enter your phone number",
            Field::Message => "Write a message...",
        }
    }

    /// Label used in the submission summary.
    pub const fn summary_label(self) -> &'static str {
        match self {
            Field::Name => "Name:",
            Field::Email => "Email:",
            Field::PhoneNumber => "Phone Number:",
            Field::Message => "Message:",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The four field values. Fields are never absent, only empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone_number,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Message => &mut self.message,
        };
        *slot = value;
    }
}

/// Messages for the fields currently deemed invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn apply(&mut self, field: Field, result: ValidationResult) {
        match result {
            ValidationResult::Valid => {
                self.entries.remove(&field);
            }
            ValidationResult::Invalid(err) => {
                self.entries.insert(field, err.message().to_string());
            }
        }
    }
}

/// Owns the form state and applies the validation rules.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    values: FormValues,
    errors: ValidationErrors,
    modal_open: bool,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// Overwrite one field's value. Errors are left alone.
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        trace!(field = field.key(), "field changed");
    }

    /// Validate one field against `current_value`, adding or clearing its error.
    pub fn blur(&mut self, field: Field, current_value: &str) {
        let result = validate(field, current_value);
        debug!(field = field.key(), valid = result.is_valid(), "field blurred");
        self.errors.apply(field, result);
    }

    /// Validate every field with its stored value and open the summary when
    /// none fail. Returns whether the summary opened.
    pub fn submit(&mut self) -> bool {
        for field in Field::ALL {
            let result = validate(field, self.values.get(field));
            self.errors.apply(field, result);
        }
        self.modal_open = self.errors.is_empty();
        debug!(
            invalid = self.errors.len(),
            opened = self.modal_open,
            "form submitted"
        );
        self.modal_open
    }

    /// Hide the summary. Values and errors are kept.
    pub fn close_summary(&mut self) {
        self.modal_open = false;
        debug!("summary closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{EMAIL_MESSAGE, NAME_MESSAGE, PHONE_MESSAGE};

    fn filled(name: &str, email: &str, phone: &str, message: &str) -> FormController {
        let mut form = FormController::new();
        form.change(Field::Name, name);
        form.change(Field::Email, email);
        form.change(Field::PhoneNumber, phone);
        form.change(Field::Message, message);
        form
    }

    #[test]
    fn starts_empty_and_closed() {
        let form = FormController::new();
        assert_eq!(form.values(), &FormValues::default());
        assert!(form.errors().is_empty());
        assert!(!form.modal_open());
    }

    #[test]
    fn change_does_not_touch_errors() {
        let mut form = FormController::new();
        form.blur(Field::Name, "");
        form.change(Field::Name, "Jane");
        assert_eq!(form.values().name, "Jane");
        assert_eq!(form.errors().get(Field::Name), Some(NAME_MESSAGE));
    }

    #[test]
    fn blur_adds_then_clears_error() {
        let mut form = FormController::new();
        form.blur(Field::Email, "nope");
        assert_eq!(form.errors().get(Field::Email), Some(EMAIL_MESSAGE));
        form.blur(Field::Email, "a@b.c");
        assert!(!form.errors().contains(Field::Email));
    }

    #[test]
    fn blur_only_touches_its_field() {
        let mut form = FormController::new();
        form.blur(Field::Name, "");
        form.blur(Field::PhoneNumber, "123");
        form.blur(Field::Name, "Jane");
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().get(Field::PhoneNumber), Some(PHONE_MESSAGE));
    }

    #[test]
    fn blur_on_message_never_errors() {
        let mut form = FormController::new();
        form.blur(Field::Message, "");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn valid_submit_opens_summary() {
        let mut form = filled("Jane Doe", "jane@example.com", "5551234567", "");
        assert!(form.submit());
        assert!(form.modal_open());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn empty_submit_reports_every_required_field() {
        let mut form = FormController::new();
        assert!(!form.submit());
        let fields: Vec<Field> = form.errors().iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::PhoneNumber]);
    }

    #[test]
    fn single_invalid_field_keeps_summary_closed() {
        let mut form = filled("Jane Doe", "jane@example.com", "123", "");
        assert!(!form.submit());
        assert!(!form.modal_open());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().get(Field::PhoneNumber), Some(PHONE_MESSAGE));
    }

    #[test]
    fn submit_clears_errors_fixed_since_last_blur() {
        let mut form = filled("Jane Doe", "jane@example.com", "5551234567", "");
        form.blur(Field::Name, "");
        assert!(form.submit());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn close_keeps_values_and_resubmit_reopens() {
        let mut form = filled("Jane Doe", "jane@example.com", "5551234567", "hi");
        form.submit();
        let before = form.values().clone();
        form.close_summary();
        assert!(!form.modal_open());
        assert_eq!(form.values(), &before);
        assert!(form.submit());
        assert_eq!(form.values(), &before);
    }

    #[test]
    fn field_order_and_text() {
        assert_eq!(Field::ALL[2].label(), "Phone Number *");
        assert_eq!(Field::Message.placeholder(), "Write a message...");
        assert_eq!(Field::PhoneNumber.to_string(), "phoneNumber");
    }
}
