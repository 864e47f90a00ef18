//! The department dialog's inputs.

use super::Form;
use crate::{
  entity::Department,
  validation::{Field, ValidationErrors},
};

#[derive(Debug, Clone, Default)]
pub struct DepartmentForm {
  /// Read-only; shows the target's id.
  pub id:   String,
  pub name: String,
}

impl Form for DepartmentForm {
  type Entity = Department;

  const TITLE: &'static str = "Department";
  const FIELDS: &'static [Field] = &[Field::Name];

  fn fill(&mut self, entity: &Department) {
    self.id = entity.id.map(|id| id.to_string()).unwrap_or_default();
    self.name = entity.name.clone();
  }

  fn candidate(&self, id: Option<i64>) -> Result<Department, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_text_max(Field::Name, &self.name, Department::NAME_MAX_LEN);
    errors.into_result(|| Department { id, name: self.name.trim().to_owned() })
  }

  fn text(&self, field: Field) -> Option<&str> {
    match field {
      Field::Name => Some(self.name.as_str()),
      _ => None,
    }
  }

  fn text_mut(&mut self, field: Field) -> Option<&mut String> {
    match field {
      Field::Name => Some(&mut self.name),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::validation::REQUIRED;

  #[test]
  fn fill_then_candidate_round_trips() {
    let mut form = DepartmentForm::default();
    form.fill(&Department::new(9, "Fashion"));
    assert_eq!(form.id, "9");
    assert_eq!(form.candidate(Some(9)), Ok(Department::new(9, "Fashion")));
  }

  #[test]
  fn whitespace_name_is_required_error() {
    let form = DepartmentForm { id: String::new(), name: "  \t".into() };
    let errors = form.candidate(None).unwrap_err();
    assert_eq!(errors.get(Field::Name), Some(REQUIRED));
  }

  #[test]
  fn name_is_trimmed() {
    let form = DepartmentForm { id: String::new(), name: " Books ".into() };
    assert_eq!(form.candidate(None).unwrap().name, "Books");
  }
}
