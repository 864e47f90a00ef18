//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Birth dates are stored as ISO 8601 calendar dates (`YYYY-MM-DD`).

use chrono::NaiveDate;
use roster_core::entity::{Department, Seller};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub const DEPARTMENT_COLUMNS: &str = "id, name";

pub fn department_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Department> {
  Ok(Department { id: Some(row.get(0)?), name: row.get(1)? })
}

/// Seller columns joined with the owning department.
pub const SELLER_SELECT: &str = "
  SELECT s.id, s.name, s.email, s.birth_date, s.base_salary,
         d.id, d.name
  FROM seller s
  JOIN department d ON d.id = s.department_id";

/// A seller row before its date column is decoded.
pub struct RawSeller {
  pub id:              i64,
  pub name:            String,
  pub email:           String,
  pub birth_date:      String,
  pub base_salary:     f64,
  pub department_id:   i64,
  pub department_name: String,
}

impl RawSeller {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      name:            row.get(1)?,
      email:           row.get(2)?,
      birth_date:      row.get(3)?,
      base_salary:     row.get(4)?,
      department_id:   row.get(5)?,
      department_name: row.get(6)?,
    })
  }

  pub fn into_seller(self) -> Result<Seller> {
    Ok(Seller {
      id:          Some(self.id),
      name:        self.name,
      email:       self.email,
      birth_date:  Some(decode_date(&self.birth_date)?),
      base_salary: self.base_salary,
      department:  Some(Department::new(self.department_id, self.department_name)),
    })
  }
}
