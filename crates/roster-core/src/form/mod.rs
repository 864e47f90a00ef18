//! Form controllers — the edit half of the single-record transaction.
//!
//! A [`FormController`] is bound to one target entity and one service. On
//! commit it asks its [`Form`] for a fresh candidate built from the raw
//! input; if validation passes the candidate is saved, every subscriber is
//! notified, and the modal scope closes. Validation and storage failures
//! keep the dialog open with messages attached so the user can retry.

pub mod department;
pub mod seller;

use crate::{
  entity::Entity,
  error::{Error, Result},
  modal::{ModalScope, Window, WindowId},
  notify::{DataChangeListener, NotificationChannel},
  service::SharedService,
  validation::{Field, ValidationErrors},
};

pub use department::DepartmentForm;
pub use seller::SellerForm;

use std::rc::Rc;

// ─── Form ────────────────────────────────────────────────────────────────────

/// The raw input state of one dialog and how to turn it into an entity.
pub trait Form {
  type Entity: Entity;

  /// Dialog title.
  const TITLE: &'static str;

  /// Fields that can carry an error, in display order.
  const FIELDS: &'static [Field];

  /// Initialise the inputs from `entity`'s current values.
  fn fill(&mut self, entity: &Self::Entity);

  /// Build a fresh candidate with identity `id` from the current inputs.
  ///
  /// Every check runs; all failures are returned together.
  fn candidate(&self, id: Option<i64>) -> Result<Self::Entity, ValidationErrors>;

  /// Load whatever the inputs offer as choices (e.g. a picker's entries).
  fn load_associated_objects(&mut self) -> Result<()> { Ok(()) }

  /// Raw text of a text input, if `field` is one.
  fn text(&self, field: Field) -> Option<&str>;

  /// Mutable raw text of a text input, if `field` is one.
  fn text_mut(&mut self, field: Field) -> Option<&mut String>;
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
  /// Created, no entity written into the inputs yet.
  Unbound,
  /// Inputs reflect the target; waiting for save or cancel.
  Bound,
  /// Terminal. The controller is not reused.
  Closed,
}

/// What a commit attempt led to. Wiring errors are reported separately as
/// [`Error`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome<E> {
  /// Stored, subscribers notified, dialog closed.
  Saved(E),
  /// Validation failed; see [`FormController::errors`].
  Invalid,
  /// The service failed; see [`FormController::dialog_error`].
  Failed,
}

// ─── Controller ──────────────────────────────────────────────────────────────

pub struct FormController<F: Form> {
  form:         F,
  entity:       Option<F::Entity>,
  service:      Option<SharedService<F::Entity>>,
  listeners:    NotificationChannel,
  errors:       ValidationErrors,
  dialog_error: Option<String>,
  scope:        Option<ModalScope>,
  state:        FormState,
}

impl<F: Form> FormController<F> {
  pub fn new(form: F) -> Self {
    Self {
      form,
      entity: None,
      service: None,
      listeners: NotificationChannel::new(),
      errors: ValidationErrors::new(),
      dialog_error: None,
      scope: None,
      state: FormState::Unbound,
    }
  }

  // ── Wiring ────────────────────────────────────────────────────────────

  /// Set the target entity: a default one to create, a loaded one to edit.
  pub fn set_entity(&mut self, entity: F::Entity) { self.entity = Some(entity); }

  pub fn set_service(&mut self, service: SharedService<F::Entity>) { self.service = Some(service); }

  pub fn subscribe(&mut self, listener: Rc<dyn DataChangeListener>) {
    self.listeners.subscribe(listener);
  }

  /// Subscribe every listener of `channel`.
  pub fn subscribe_all(&mut self, channel: &NotificationChannel) {
    self.listeners.subscribe_all(channel);
  }

  /// Write the target entity's values into the inputs.
  pub fn update_form_data(&mut self) -> Result<()> {
    let entity = self.entity.as_ref().ok_or(Error::Unbound("entity"))?;
    self.form.fill(entity);
    if self.state == FormState::Unbound {
      self.state = FormState::Bound;
    }
    Ok(())
  }

  /// Load the form's choice lists.
  pub fn load_associated_objects(&mut self) -> Result<()> { self.form.load_associated_objects() }

  /// Show the dialog as a modal child of `owner`.
  pub fn show(&mut self, owner: &Window) { self.scope = Some(ModalScope::open(owner, F::TITLE)); }

  // ── Actions ───────────────────────────────────────────────────────────

  /// Validate the inputs and, if they pass, save the candidate.
  ///
  /// Returns `Err` only for wiring defects: a missing entity or service, or
  /// a commit on a closed form.
  pub fn commit(&mut self) -> Result<CommitOutcome<F::Entity>> {
    if self.state == FormState::Closed {
      return Err(Error::Closed);
    }
    let target = self.entity.as_ref().ok_or(Error::Unbound("entity"))?;
    let service = self.service.clone().ok_or(Error::Unbound("service"))?;

    let candidate = match self.form.candidate(target.id()) {
      Ok(candidate) => candidate,
      Err(errors) => {
        tracing::debug!(%errors, "candidate rejected");
        self.errors = errors;
        self.dialog_error = None;
        return Ok(CommitOutcome::Invalid);
      }
    };
    self.errors = ValidationErrors::new();

    match service.save_or_update(&candidate) {
      Ok(saved) => {
        tracing::info!(id = ?saved.id(), form = F::TITLE, "saved");
        self.dialog_error = None;
        self.listeners.publish();
        self.close();
        Ok(CommitOutcome::Saved(saved))
      }
      Err(e) => {
        tracing::warn!(error = %e, form = F::TITLE, "save failed");
        self.dialog_error = Some(format!("Error saving object: {e}"));
        Ok(CommitOutcome::Failed)
      }
    }
  }

  /// Close without building a candidate or touching the service.
  pub fn cancel(&mut self) { self.close(); }

  fn close(&mut self) {
    self.state = FormState::Closed;
    if let Some(scope) = &mut self.scope {
      scope.close();
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn form(&self) -> &F { &self.form }

  pub fn form_mut(&mut self) -> &mut F { &mut self.form }

  pub fn entity(&self) -> Option<&F::Entity> { self.entity.as_ref() }

  pub fn state(&self) -> FormState { self.state }

  pub fn is_closed(&self) -> bool { self.state == FormState::Closed }

  /// Errors from the last rejected candidate. Empty after a clean build.
  pub fn errors(&self) -> &ValidationErrors { &self.errors }

  /// The error text to show under `field`, or `""`.
  pub fn error_text(&self, field: Field) -> &str { self.errors.get(field).unwrap_or("") }

  /// Dialog-level message from the last failed save.
  pub fn dialog_error(&self) -> Option<&str> { self.dialog_error.as_deref() }

  pub fn scope(&self) -> Option<&ModalScope> { self.scope.as_ref() }

  /// Whether this dialog currently blocks input to `window`.
  pub fn blocks(&self, window: WindowId) -> bool {
    self.scope.as_ref().is_some_and(|s| s.blocks(window))
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;
  use crate::{
    entity::Department,
    modal::ModalState,
    testing::{MemoryService, counter},
    validation::REQUIRED,
  };

  fn bound(
    entity: Department,
    service: &Rc<MemoryService<Department>>,
  ) -> FormController<DepartmentForm> {
    let mut form = FormController::new(DepartmentForm::default());
    form.set_entity(entity);
    form.set_service(service.clone());
    form.update_form_data().unwrap();
    form
  }

  #[test]
  fn blank_name_is_rejected_without_calling_service() {
    let service = Rc::new(MemoryService::<Department>::new());
    let (hits, listener) = counter();
    let main = Window::root("Roster");
    let mut form = bound(Department { id: Some(0), name: String::new() }, &service);
    form.subscribe(listener);
    form.show(&main);

    let outcome = form.commit().unwrap();

    assert_eq!(outcome, CommitOutcome::Invalid);
    assert_eq!(form.errors().get(Field::Name), Some(REQUIRED));
    assert_eq!(form.errors().len(), 1);
    assert_eq!(service.save_calls(), 0);
    assert_eq!(hits.get(), 0);
    assert_eq!(form.state(), FormState::Bound);
    assert!(form.blocks(main.id));
  }

  #[test]
  fn valid_department_is_saved_notified_and_closed() {
    let service = Rc::new(MemoryService::<Department>::new());
    let (first, l1) = counter();
    let (second, l2) = counter();
    let main = Window::root("Roster");
    let mut form = bound(Department { id: Some(0), name: String::new() }, &service);
    form.subscribe(l1);
    form.subscribe(l2);
    form.show(&main);
    form.form_mut().name = "Electronics".into();

    let outcome = form.commit().unwrap();

    let CommitOutcome::Saved(saved) = outcome else { panic!("expected a save") };
    assert_eq!(saved.name, "Electronics");
    assert!(!saved.is_new());
    assert_eq!(service.save_calls(), 1);
    assert_eq!(service.saved_ids(), [Some(0)]);
    assert_eq!((first.get(), second.get()), (1, 1));
    assert!(form.is_closed());
    assert_eq!(form.scope().map(ModalScope::state), Some(ModalState::Closed));
    assert!(!form.blocks(main.id));
  }

  #[test]
  fn update_keeps_the_target_id() {
    let service = Rc::new(MemoryService::with(vec![Department::new(4, "Books")]));
    let mut form = bound(Department::new(4, "Books"), &service);
    assert_eq!(form.form().id, "4");
    form.form_mut().name = "Comics".into();

    form.commit().unwrap();

    assert_eq!(service.saved_ids(), [Some(4)]);
    assert_eq!(service.rows(), [Department::new(4, "Comics")]);
  }

  #[test]
  fn listener_sees_the_saved_row() {
    let service = Rc::new(MemoryService::<Department>::new());
    let main = Window::root("Roster");
    let mut form = bound(Department::default(), &service);
    form.show(&main);
    form.form_mut().name = "Garden".into();

    // Record how many rows the service held when the listener ran.
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
      let seen = seen.clone();
      let service = service.clone();
      form.subscribe(Rc::new(move || seen.borrow_mut().push(service.rows().len())));
    }

    form.commit().unwrap();
    assert_eq!(*seen.borrow(), [1]);
    assert!(form.is_closed());
  }

  #[test]
  fn cancel_never_touches_service_or_listeners() {
    let service = Rc::new(MemoryService::<Department>::new());
    let (hits, listener) = counter();
    let main = Window::root("Roster");
    let mut form = bound(Department::default(), &service);
    form.subscribe(listener);
    form.show(&main);
    form.form_mut().name = "Toys".into();

    form.cancel();

    assert!(form.is_closed());
    assert!(!form.blocks(main.id));
    assert_eq!(service.save_calls(), 0);
    assert_eq!(hits.get(), 0);
  }

  #[test]
  fn storage_failure_keeps_dialog_open_and_retry_succeeds() {
    let service = Rc::new(MemoryService::<Department>::new());
    let (hits, listener) = counter();
    let main = Window::root("Roster");
    let mut form = bound(Department::default(), &service);
    form.subscribe(listener);
    form.show(&main);
    form.form_mut().name = "Tools".into();

    service.fail_next_save();
    assert_eq!(form.commit().unwrap(), CommitOutcome::Failed);
    assert!(form.dialog_error().is_some_and(|m| !m.is_empty()));
    assert!(form.errors().is_empty());
    assert_eq!(form.state(), FormState::Bound);
    assert!(form.blocks(main.id));
    assert_eq!(hits.get(), 0);
    assert!(service.rows().is_empty());

    assert!(matches!(form.commit().unwrap(), CommitOutcome::Saved(_)));
    assert_eq!(hits.get(), 1);
    assert_eq!(service.rows().len(), 1);
    assert_eq!(service.saved_ids(), [None, None]);
  }

  #[test]
  fn fixing_a_field_clears_its_message() {
    let service = Rc::new(MemoryService::<Department>::new());
    let mut form = bound(Department::default(), &service);

    form.commit().unwrap();
    assert_eq!(form.error_text(Field::Name), REQUIRED);

    service.fail_next_save();
    form.form_mut().name = "Music".into();
    form.commit().unwrap();
    assert_eq!(form.error_text(Field::Name), "");
  }

  #[test]
  fn missing_entity_or_service_is_a_wiring_error() {
    let mut form = FormController::new(DepartmentForm::default());
    assert!(matches!(form.update_form_data(), Err(Error::Unbound("entity"))));
    assert!(matches!(form.commit(), Err(Error::Unbound("entity"))));

    form.set_entity(Department::default());
    assert!(matches!(form.commit(), Err(Error::Unbound("service"))));
  }

  #[test]
  fn closed_form_cannot_commit_again() {
    let service = Rc::new(MemoryService::<Department>::new());
    let mut form = bound(Department::default(), &service);
    form.cancel();
    assert!(matches!(form.commit(), Err(Error::Closed)));
  }
}
