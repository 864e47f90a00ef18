//! Modal edit dialogs: a bound form controller plus keyboard focus.

use roster_core::{
  entity::{Department, Seller},
  form::{CommitOutcome, DepartmentForm, Form, FormController, SellerForm},
  modal::WindowId,
  validation::Field,
};

use crate::constraints::Constraint;

/// What happened after the dialog handled a commit.
#[derive(Debug, Clone, PartialEq)]
pub enum Committed {
  Department(CommitOutcome<Department>),
  Seller(CommitOutcome<Seller>),
}

impl Committed {
  pub fn is_saved(&self) -> bool {
    matches!(
      self,
      Committed::Department(CommitOutcome::Saved(_)) | Committed::Seller(CommitOutcome::Saved(_))
    )
  }
}

pub enum DialogKind {
  Department(FormController<DepartmentForm>),
  Seller(FormController<SellerForm>),
}

/// An open dialog and which of its fields has focus.
pub struct Dialog {
  pub kind:  DialogKind,
  pub focus: usize,
}

impl Dialog {
  pub fn department(controller: FormController<DepartmentForm>) -> Self {
    Self { kind: DialogKind::Department(controller), focus: 0 }
  }

  pub fn seller(controller: FormController<SellerForm>) -> Self {
    Self { kind: DialogKind::Seller(controller), focus: 0 }
  }

  pub fn title(&self) -> &'static str {
    match &self.kind {
      DialogKind::Department(_) => DepartmentForm::TITLE,
      DialogKind::Seller(_) => SellerForm::TITLE,
    }
  }

  pub fn fields(&self) -> &'static [Field] {
    match &self.kind {
      DialogKind::Department(_) => DepartmentForm::FIELDS,
      DialogKind::Seller(_) => SellerForm::FIELDS,
    }
  }

  pub fn focused(&self) -> Field { self.fields()[self.focus] }

  pub fn focus_next(&mut self) { self.focus = (self.focus + 1) % self.fields().len(); }

  pub fn focus_prev(&mut self) {
    let len = self.fields().len();
    self.focus = (self.focus + len - 1) % len;
  }

  pub fn is_closed(&self) -> bool {
    match &self.kind {
      DialogKind::Department(c) => c.is_closed(),
      DialogKind::Seller(c) => c.is_closed(),
    }
  }

  pub fn blocks(&self, window: WindowId) -> bool {
    match &self.kind {
      DialogKind::Department(c) => c.blocks(window),
      DialogKind::Seller(c) => c.blocks(window),
    }
  }

  /// The read-only id text.
  pub fn id_text(&self) -> &str {
    match &self.kind {
      DialogKind::Department(c) => &c.form().id,
      DialogKind::Seller(c) => &c.form().id,
    }
  }

  pub fn text(&self, field: Field) -> Option<&str> {
    match &self.kind {
      DialogKind::Department(c) => c.form().text(field),
      DialogKind::Seller(c) => c.form().text(field),
    }
  }

  pub fn error_text(&self, field: Field) -> &str {
    match &self.kind {
      DialogKind::Department(c) => c.error_text(field),
      DialogKind::Seller(c) => c.error_text(field),
    }
  }

  pub fn dialog_error(&self) -> Option<&str> {
    match &self.kind {
      DialogKind::Department(c) => c.dialog_error(),
      DialogKind::Seller(c) => c.dialog_error(),
    }
  }

  /// The picked department's name, for the seller picker.
  pub fn department_choice(&self) -> Option<&str> {
    match &self.kind {
      DialogKind::Seller(c) => c.form().selected_department().map(|d| d.name.as_str()),
      DialogKind::Department(_) => None,
    }
  }

  fn constraint(&self, field: Field) -> Constraint {
    match (&self.kind, field) {
      (DialogKind::Department(_), _) => Constraint::Text { max: Department::NAME_MAX_LEN },
      (DialogKind::Seller(_), Field::Email) => Constraint::Text { max: Seller::EMAIL_MAX_LEN },
      (DialogKind::Seller(_), Field::BirthDate) => Constraint::Date,
      (DialogKind::Seller(_), Field::BaseSalary) => Constraint::Decimal,
      (DialogKind::Seller(_), _) => Constraint::Text { max: Seller::NAME_MAX_LEN },
    }
  }

  fn focused_text_mut(&mut self) -> Option<&mut String> {
    let field = self.focused();
    match &mut self.kind {
      DialogKind::Department(c) => c.form_mut().text_mut(field),
      DialogKind::Seller(c) => c.form_mut().text_mut(field),
    }
  }

  // ── Editing ───────────────────────────────────────────────────────────

  pub fn type_char(&mut self, c: char) {
    let constraint = self.constraint(self.focused());
    if let Some(text) = self.focused_text_mut() {
      constraint.push(text, c);
    }
  }

  pub fn backspace(&mut self) {
    if let Some(text) = self.focused_text_mut() {
      text.pop();
    }
  }

  /// Step the department picker when it has focus.
  pub fn cycle_choice(&mut self, step: isize) {
    if self.focused() != Field::Department {
      return;
    }
    if let DialogKind::Seller(c) = &mut self.kind {
      c.form_mut().cycle_department(step);
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────

  pub fn commit(&mut self) -> roster_core::Result<Committed> {
    Ok(match &mut self.kind {
      DialogKind::Department(c) => Committed::Department(c.commit()?),
      DialogKind::Seller(c) => Committed::Seller(c.commit()?),
    })
  }

  pub fn cancel(&mut self) {
    match &mut self.kind {
      DialogKind::Department(c) => c.cancel(),
      DialogKind::Seller(c) => c.cancel(),
    }
  }
}
