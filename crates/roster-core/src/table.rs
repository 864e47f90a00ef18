//! Table columns as typed accessors.
//!
//! Each column pairs a header with a plain function that renders the cell
//! for one entity, so a view never looks fields up by name.

use crate::entity::{DATE_FORMAT, Department, Seller};

/// One table column over entities of type `E`.
#[derive(Clone, Copy)]
pub struct Column<E> {
  pub title: &'static str,
  /// Preferred width in characters.
  pub width: u16,
  pub value: fn(&E) -> String,
}

impl<E> Column<E> {
  pub fn render(&self, entity: &E) -> String { (self.value)(entity) }
}

/// Render every column of `entity` in order.
pub fn row<E>(columns: &[Column<E>], entity: &E) -> Vec<String> {
  columns.iter().map(|c| c.render(entity)).collect()
}

/// Columns with a per-entity-type default set.
pub trait Tabular: Sized + 'static {
  fn columns() -> &'static [Column<Self>];
}

fn format_id(id: Option<i64>) -> String { id.map(|id| id.to_string()).unwrap_or_default() }

pub static DEPARTMENT_COLUMNS: [Column<Department>; 2] = [
  Column { title: "Id", width: 6, value: |d| format_id(d.id) },
  Column { title: "Name", width: 30, value: |d| d.name.clone() },
];

pub static SELLER_COLUMNS: [Column<Seller>; 6] = [
  Column { title: "Id", width: 6, value: |s| format_id(s.id) },
  Column { title: "Name", width: 24, value: |s| s.name.clone() },
  Column { title: "Email", width: 28, value: |s| s.email.clone() },
  Column {
    title: "Birth date",
    width: 12,
    value: |s| s.birth_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
  },
  Column { title: "Base salary", width: 12, value: |s| format!("{:.2}", s.base_salary) },
  Column { title: "Department", width: 20, value: |s| s.department_name().to_owned() },
];

impl Tabular for Department {
  fn columns() -> &'static [Column<Self>] { &DEPARTMENT_COLUMNS }
}

impl Tabular for Seller {
  fn columns() -> &'static [Column<Self>] { &SELLER_COLUMNS }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn seller_row_formats_date_and_salary() {
    let seller = Seller {
      id:          Some(7),
      name:        "Maria Green".into(),
      email:       "maria@gmail.com".into(),
      birth_date:  NaiveDate::from_ymd_opt(1979, 12, 31),
      base_salary: 3000.0,
      department:  Some(Department::new(2, "Electronics")),
    };

    assert_eq!(
      row(Seller::columns(), &seller),
      ["7", "Maria Green", "maria@gmail.com", "31/12/1979", "3000.00", "Electronics"]
    );
  }

  #[test]
  fn new_department_has_blank_id_cell() {
    let d = Department { id: None, name: "Books".into() };
    assert_eq!(row(Department::columns(), &d), ["", "Books"]);
  }
}
