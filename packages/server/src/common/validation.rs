//! Request field validation.
//!
//! Handlers collect every failing field before answering, so the client gets
//! the full list in one 400 response.

use serde::Serialize;
use std::ops::RangeInclusive;

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulates field errors for a single request.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Require a string that is non-empty after trimming.
    pub fn require_str<'a>(
        &mut self,
        field: &str,
        value: Option<&'a str>,
        message: &str,
    ) -> Option<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.error(field, message);
                None
            }
        }
    }

    /// Require a string whose length in characters lies within `range`.
    pub fn str_length<'a>(
        &mut self,
        field: &str,
        value: Option<&'a str>,
        range: RangeInclusive<usize>,
        message: &str,
    ) -> Option<&'a str> {
        match value {
            Some(v) if range.contains(&v.chars().count()) => Some(v),
            _ => {
                self.error(field, message);
                None
            }
        }
    }

    /// Require an integer within `range`.
    pub fn int_in_range(
        &mut self,
        field: &str,
        value: Option<i64>,
        range: RangeInclusive<i64>,
        message: &str,
    ) -> Option<i64> {
        match value {
            Some(v) if range.contains(&v) => Some(v),
            _ => {
                self.error(field, message);
                None
            }
        }
    }

    /// Like `int_in_range`, but a missing value is fine.
    pub fn optional_int_in_range(
        &mut self,
        field: &str,
        value: Option<i64>,
        range: RangeInclusive<i64>,
        message: &str,
    ) -> Option<i64> {
        value.and_then(|v| self.int_in_range(field, Some(v), range, message))
    }

    /// Parse a value with `FromStr`, recording `message` on failure.
    pub fn parse<T: std::str::FromStr>(
        &mut self,
        field: &str,
        value: Option<&str>,
        message: &str,
    ) -> Option<T> {
        match value.and_then(|v| v.trim().parse::<T>().ok()) {
            Some(parsed) => Some(parsed),
            None => {
                self.error(field, message);
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
