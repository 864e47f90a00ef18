//! Entities: the records a user lists, creates, edits and deletes.
//!
//! An entity whose `id` is `None` (or `Some(0)`) has never been persisted.
//! Identity is assigned by the service on first commit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display format for calendar dates, in tables and in form inputs.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Anything with an optional persisted identity.
pub trait Entity: Clone {
  fn id(&self) -> Option<i64>;

  /// Assign persisted identity.
  fn set_id(&mut self, id: i64);

  /// `true` if this record has never been committed.
  fn is_new(&self) -> bool { self.id().is_none_or(|id| id == 0) }
}

// ─── Department ──────────────────────────────────────────────────────────────

/// An organisational unit that sellers belong to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
  pub id:   Option<i64>,
  pub name: String,
}

impl Department {
  pub const NAME_MAX_LEN: usize = 30;

  pub fn new(id: i64, name: impl Into<String>) -> Self {
    Self { id: Some(id), name: name.into() }
  }
}

impl Entity for Department {
  fn id(&self) -> Option<i64> { self.id }

  fn set_id(&mut self, id: i64) { self.id = Some(id); }
}

// ─── Seller ──────────────────────────────────────────────────────────────────

/// A seller assigned to exactly one [`Department`].
///
/// `department` is `None` only for a fresh record, before the form applies
/// its default selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seller {
  pub id:          Option<i64>,
  pub name:        String,
  pub email:       String,
  pub birth_date:  Option<NaiveDate>,
  pub base_salary: f64,
  pub department:  Option<Department>,
}

impl Seller {
  pub const NAME_MAX_LEN: usize = 70;
  pub const EMAIL_MAX_LEN: usize = 60;

  /// Name of the owning department, or an empty string.
  pub fn department_name(&self) -> &str {
    self.department.as_ref().map_or("", |d| d.name.as_str())
  }
}

impl Entity for Seller {
  fn id(&self) -> Option<i64> { self.id }

  fn set_id(&mut self, id: i64) { self.id = Some(id); }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_and_absent_ids_are_new() {
    assert!(Department::default().is_new());
    assert!(Department { id: Some(0), name: "x".into() }.is_new());
    assert!(!Department::new(3, "Books").is_new());
  }

  #[test]
  fn seller_department_name_defaults_to_empty() {
    let mut s = Seller::default();
    assert_eq!(s.department_name(), "");
    s.department = Some(Department::new(1, "Computers"));
    assert_eq!(s.department_name(), "Computers");
  }
}
