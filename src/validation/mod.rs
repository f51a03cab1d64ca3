//! Form validators. Each one inspects a submitted request body and returns a
//! [`FieldErrors`] map; an empty map means the input is valid.

pub mod auth;
pub mod post;
pub mod profile;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::utils::AppError;

pub use auth::{validate_login, validate_register};
pub use post::validate_post;
pub use profile::{validate_education, validate_experience, validate_profile};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex");
    static ref URL_RE: Regex =
        Regex::new(r"^(?i)(https?://)?([a-z0-9-]+\.)+[a-z0-9-]{2,}(:\d{1,5})?(/\S*)?$")
            .expect("url regex");
}

/// Field name to message map, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records a message for `field`, replacing any earlier one.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Turns a non-empty map into a 400 validation error.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

pub(crate) fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub(crate) fn is_url(value: &str) -> bool {
    URL_RE.is_match(value.trim())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (date part kept).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}
