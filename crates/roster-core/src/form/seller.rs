//! The seller dialog's inputs, including the department picker.
//!
//! The picker is filled from a department service by
//! [`Form::load_associated_objects`]. When nothing is picked, the
//! first loaded department is used; that default is never reported as an
//! error. Only an empty picker leaves the `department` field failing.

use super::Form;
use crate::{
  entity::{DATE_FORMAT, Department, Entity, Seller},
  error::{Error, Result},
  service::SharedService,
  validation::{Field, ValidationErrors, try_parse_date, try_parse_decimal},
};

#[derive(Default)]
pub struct SellerForm {
  /// Read-only; shows the target's id.
  pub id:             String,
  pub name:           String,
  pub email:          String,
  /// `dd/mm/yyyy`.
  pub birth_date:     String,
  pub base_salary:    String,
  departments:        Vec<Department>,
  selected:           Option<Department>,
  department_service: Option<SharedService<Department>>,
}

impl SellerForm {
  pub fn new(department_service: SharedService<Department>) -> Self {
    Self { department_service: Some(department_service), ..Self::default() }
  }

  pub fn set_department_service(&mut self, service: SharedService<Department>) {
    self.department_service = Some(service);
  }

  pub fn departments(&self) -> &[Department] { &self.departments }

  /// The department a commit would attach: the picked one, else the first
  /// loaded one.
  pub fn selected_department(&self) -> Option<&Department> {
    self.selected.as_ref().or_else(|| self.departments.first())
  }

  pub fn select_department(&mut self, department: Department) { self.selected = Some(department); }

  /// Move the picker one entry forward (`step = 1`) or back (`step = -1`),
  /// wrapping around.
  pub fn cycle_department(&mut self, step: isize) {
    if self.departments.is_empty() {
      return;
    }
    let len = self.departments.len() as isize;
    let current = self
      .selected_department()
      .and_then(|sel| self.departments.iter().position(|d| d.id == sel.id))
      .map_or(0, |i| i as isize);
    let next = (current + step).rem_euclid(len) as usize;
    self.selected = Some(self.departments[next].clone());
  }
}

impl Form for SellerForm {
  type Entity = Seller;

  const TITLE: &'static str = "Seller";
  const FIELDS: &'static [Field] =
    &[Field::Name, Field::Email, Field::BirthDate, Field::BaseSalary, Field::Department];

  fn fill(&mut self, entity: &Seller) {
    self.id = entity.id.map(|id| id.to_string()).unwrap_or_default();
    self.name = entity.name.clone();
    self.email = entity.email.clone();
    self.selected = entity.department.clone();

    // A new record starts with a blank date and salary.
    if entity.is_new() {
      self.birth_date.clear();
      self.base_salary.clear();
      return;
    }
    self.birth_date = entity
      .birth_date
      .map(|d| d.format(DATE_FORMAT).to_string())
      .unwrap_or_default();
    self.base_salary = format!("{:.2}", entity.base_salary);
  }

  fn candidate(&self, id: Option<i64>) -> Result<Seller, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_text_max(Field::Name, &self.name, Seller::NAME_MAX_LEN);
    errors.require_text_max(Field::Email, &self.email, Seller::EMAIL_MAX_LEN);

    let birth_date = try_parse_date(&self.birth_date);
    errors.require(Field::BirthDate, &birth_date);

    let base_salary = try_parse_decimal(&self.base_salary);
    errors.require(Field::BaseSalary, &base_salary);

    let department = self.selected_department().cloned();
    errors.require(Field::Department, &department);

    errors.into_result(|| Seller {
      id,
      name: self.name.trim().to_owned(),
      email: self.email.trim().to_owned(),
      birth_date,
      base_salary: base_salary.unwrap_or_default(),
      department,
    })
  }

  /// Fill the department picker from the department service.
  fn load_associated_objects(&mut self) -> Result<()> {
    let service = self
      .department_service
      .as_ref()
      .ok_or(Error::Unbound("department service"))?;
    self.departments = service.find_all()?;

    // Refresh a stale selection from the freshly loaded list.
    if let Some(current) = &self.selected
      && let Some(fresh) = self.departments.iter().find(|d| d.id == current.id)
    {
      self.selected = Some(fresh.clone());
    }
    Ok(())
  }

  fn text(&self, field: Field) -> Option<&str> {
    match field {
      Field::Name => Some(self.name.as_str()),
      Field::Email => Some(self.email.as_str()),
      Field::BirthDate => Some(self.birth_date.as_str()),
      Field::BaseSalary => Some(self.base_salary.as_str()),
      Field::Department => None,
    }
  }

  fn text_mut(&mut self, field: Field) -> Option<&mut String> {
    match field {
      Field::Name => Some(&mut self.name),
      Field::Email => Some(&mut self.email),
      Field::BirthDate => Some(&mut self.birth_date),
      Field::BaseSalary => Some(&mut self.base_salary),
      Field::Department => None,
    }
  }
}
