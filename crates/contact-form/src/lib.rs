#![forbid(unsafe_code)]

//! Terminal contact form.
//!
//! - [`form`]: field values, per-field errors, and the [`FormController`].
//! - [`validation`]: the regex rules behind each field.
//! - [`app`]: the [`ContactFormApp`] runtime model (focus, keys, mouse, view).
//! - [`cli`] and [`logging`]: binary configuration.

pub mod app;
pub mod cli;
pub mod form;
pub mod logging;
pub mod theme;
pub mod validation;

pub use app::{ContactFormApp, Focus, FormLayout, Msg};
pub use form::{Field, FormController, FormValues, ValidationErrors};
pub use validation::{ValidationError, ValidationResult, Validator};
