//! Field validation for submitted forms.
//!
//! Each form owns a [`ValidationResult`] and runs the predicates below against its own fields
//! in a fixed order. Only the first failure per field is kept. Non-field errors collect
//! failures that do not belong to a single input, such as rejected credentials.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

/// Email syntax accepted at signup and login.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// Accumulated validation failures for one form submission.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    field_errors: BTreeMap<String, String>,
    non_field_errors: Vec<String>,
}

impl ValidationResult {
    /// True when no field error and no non-field error has been recorded.
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Records `message` for `key` unless the field already has an error.
    pub fn add_field_error(&mut self, key: &str, message: &str) {
        self.field_errors
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn add_non_field_error(&mut self, message: &str) {
        self.non_field_errors.push(message.to_string());
    }

    /// Records `message` for `key` when `ok` is false.
    pub fn check_field(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn non_field_errors(&self) -> &[String] {
        &self.non_field_errors
    }
}

/// A decoded form that carries its own validation state.
pub trait Validated {
    fn validation(&self) -> &ValidationResult;

    fn validation_mut(&mut self) -> &mut ValidationResult;

    fn is_valid(&self) -> bool {
        self.validation().is_valid()
    }
}

/// True when `value` contains something other than whitespace.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when `value` has at most `n` Unicode code points.
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// True when `value` has at least `n` Unicode code points.
pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

pub fn permitted_value<T: PartialEq>(value: T, permitted: &[T]) -> bool {
    permitted.contains(&value)
}

pub fn matches(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}
