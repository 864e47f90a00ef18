//! Field-level validation: the [`ValidationErrors`] aggregator and the lenient
//! parsers that feed it.
//!
//! A candidate build never stops at the first bad field. Every check runs,
//! every failure is recorded under its field, and the build fails once at
//! the end if anything was recorded. Malformed numbers and dates parse to
//! `None` rather than erroring, so they surface through the same aggregator
//! as a missing value.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use strum::{AsRefStr, EnumIter, IntoStaticStr};

use crate::entity::DATE_FORMAT;

/// Message recorded for a required field left empty or unparseable.
pub const REQUIRED: &str = "field required";

// ─── Field ───────────────────────────────────────────────────────────────────

/// An input field that can carry a validation error.
///
/// The string form (`name`, `email`, `birthDate`, `baseSalary`,
/// `department`) is the key the error map is reported under.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
  Name,
  Email,
  BirthDate,
  BaseSalary,
  Department,
}

impl Field {
  pub fn key(self) -> &'static str { self.into() }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_ref()) }
}

// ─── Aggregator ──────────────────────────────────────────────────────────────

/// Every field that failed during one candidate build, with its message.
///
/// A field present in the map failed; a field absent from it is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
  errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
  pub fn new() -> Self { Self::default() }

  /// Record `message` for `field`. A second error for the same field
  /// replaces the first.
  pub fn add(&mut self, field: Field, message: impl Into<String>) {
    self.errors.insert(field, message.into());
  }

  pub fn is_empty(&self) -> bool { self.errors.is_empty() }

  pub fn len(&self) -> usize { self.errors.len() }

  pub fn get(&self, field: Field) -> Option<&str> { self.errors.get(&field).map(String::as_str) }

  pub fn contains(&self, field: Field) -> bool { self.errors.contains_key(&field) }

  /// The full field → message mapping.
  pub fn errors(&self) -> &BTreeMap<Field, String> { &self.errors }

  /// `Ok(value)` if nothing was recorded, otherwise the aggregate.
  pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
    if self.is_empty() { Ok(value()) } else { Err(self) }
  }

  /// Require a non-blank string.
  pub fn require_text(&mut self, field: Field, text: &str) {
    if text.trim().is_empty() {
      self.add(field, REQUIRED);
    }
  }

  /// Require a non-blank string of at most `max` characters.
  pub fn require_text_max(&mut self, field: Field, text: &str, max: usize) {
    if text.trim().is_empty() {
      self.add(field, REQUIRED);
    } else if text.chars().count() > max {
      self.add(field, format!("at most {max} characters"));
    }
  }

  /// Require that a parsed value is present.
  pub fn require<T>(&mut self, field: Field, value: &Option<T>) {
    if value.is_none() {
      self.add(field, REQUIRED);
    }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let fields: Vec<&str> = self.errors.keys().map(|k| k.key()).collect();
    write!(f, "invalid fields: {}", fields.join(", "))
  }
}

impl std::error::Error for ValidationErrors {}

// ─── Lenient parsers ─────────────────────────────────────────────────────────

/// Parse an integer, treating blank or malformed text as absent.
pub fn try_parse_int(text: &str) -> Option<i64> { text.trim().parse().ok() }

/// Parse a decimal amount, treating blank or malformed text as absent.
pub fn try_parse_decimal(text: &str) -> Option<f64> {
  text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a `dd/mm/yyyy` date, treating blank or malformed text as absent.
pub fn try_parse_date(text: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn field_keys_are_camel_case() {
    let keys: Vec<&str> = Field::iter().map(Field::key).collect();
    assert_eq!(keys, ["name", "email", "birthDate", "baseSalary", "department"]);
  }

  #[test]
  fn collects_every_failure() {
    let mut errors = ValidationErrors::new();
    errors.require_text(Field::Name, "   ");
    errors.require_text(Field::Email, "a@b.c");
    errors.require(Field::BirthDate, &None::<NaiveDate>);
    errors.require(Field::BaseSalary, &try_parse_decimal("12,5x"));

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::Name), Some(REQUIRED));
    assert!(!errors.contains(Field::Email));
    assert!(errors.contains(Field::BirthDate));
    assert!(errors.contains(Field::BaseSalary));
    assert_eq!(errors.to_string(), "invalid fields: name, birthDate, baseSalary");
  }

  #[test]
  fn over_long_text_is_reported() {
    let mut errors = ValidationErrors::new();
    errors.require_text_max(Field::Name, &"x".repeat(31), 30);
    assert_eq!(errors.get(Field::Name), Some("at most 30 characters"));
  }

  #[test]
  fn into_result_only_builds_when_clean() {
    assert_eq!(ValidationErrors::new().into_result(|| 7), Ok(7));

    let mut errors = ValidationErrors::new();
    errors.add(Field::Email, REQUIRED);
    assert!(errors.into_result(|| 7).is_err());
  }

  #[test]
  fn lenient_parsers_return_none_on_garbage() {
    assert_eq!(try_parse_int(" 42 "), Some(42));
    assert_eq!(try_parse_int(""), None);
    assert_eq!(try_parse_int("4x2"), None);
    assert_eq!(try_parse_decimal("1500.5"), Some(1500.5));
    assert_eq!(try_parse_decimal("."), None);
    assert_eq!(try_parse_decimal("NaN"), None);
    assert_eq!(try_parse_date("21/04/1990"), NaiveDate::from_ymd_opt(1990, 4, 21));
    assert_eq!(try_parse_date("31/02/1990"), None);
    assert_eq!(try_parse_date("1990-04-21"), None);
  }
}
