//! List controllers — the browse half of the single-record transaction.
//!
//! A [`ListController`] shows every record of one type, opens bound form
//! dialogs over its window, and deletes rows after confirmation. Its
//! [`ListModel`] is subscribed to the list's own channel, so any commit in a
//! dialog it opened, and any deletion it performs, triggers a full reload.

use std::{
  cell::{Cell, Ref, RefCell},
  rc::Rc,
};

use crate::{
  entity::Entity,
  error::{Error, Result},
  form::{Form, FormController},
  modal::Window,
  notify::{DataChangeListener, NotificationChannel},
  service::SharedService,
};

// ─── Model ───────────────────────────────────────────────────────────────────

/// The displayed collection and the list-level message line.
pub struct ListModel<E> {
  service: RefCell<Option<SharedService<E>>>,
  items:   RefCell<Vec<E>>,
  message: RefCell<Option<String>>,
  reloads: Cell<usize>,
}

impl<E: Entity> ListModel<E> {
  fn new() -> Self {
    Self {
      service: RefCell::new(None),
      items:   RefCell::new(Vec::new()),
      message: RefCell::new(None),
      reloads: Cell::new(0),
    }
  }

  /// Replace the collection with a fresh `find_all`.
  ///
  /// A storage failure keeps the current collection and sets the message.
  fn reload(&self) -> Result<()> {
    let service = self.service.borrow().clone().ok_or(Error::Unbound("service"))?;
    self.reloads.set(self.reloads.get() + 1);
    match service.find_all() {
      Ok(items) => {
        tracing::debug!(count = items.len(), "list reloaded");
        *self.items.borrow_mut() = items;
      }
      Err(e) => {
        tracing::warn!(error = %e, "list reload failed");
        self.set_message(format!("Error loading list: {e}"));
      }
    }
    Ok(())
  }

  fn set_message(&self, message: String) { *self.message.borrow_mut() = Some(message); }
}

impl<E: Entity> DataChangeListener for ListModel<E> {
  fn on_data_changed(&self) {
    if let Err(e) = self.reload() {
      tracing::error!(error = %e, "list notified before it was wired");
    }
  }
}

// ─── Removal ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
  /// Deleted; subscribers notified.
  Removed,
  /// The user declined, or nothing was pending.
  Cancelled,
  /// The service refused; see [`ListController::message`].
  Failed,
}

// ─── Controller ──────────────────────────────────────────────────────────────

pub struct ListController<E: Entity> {
  window:  Window,
  model:   Rc<ListModel<E>>,
  channel: NotificationChannel,
  pending: Option<E>,
}

impl<E: Entity + 'static> ListController<E> {
  /// A list shown in `window`. Its own model is its first subscriber.
  pub fn new(window: Window) -> Self {
    let model = Rc::new(ListModel::new());
    let mut channel = NotificationChannel::new();
    channel.subscribe(model.clone());
    Self { window, model, channel, pending: None }
  }

  pub fn set_service(&mut self, service: SharedService<E>) {
    *self.model.service.borrow_mut() = Some(service);
  }

  pub fn window(&self) -> &Window { &self.window }

  /// Register interest in this list's dataset: dialogs this list opens and
  /// deletions it performs will notify `listener`.
  pub fn subscribe(&mut self, listener: Rc<dyn DataChangeListener>) {
    self.channel.subscribe(listener);
  }

  /// This list's reload hook, for subscribing it to other lists.
  pub fn listener(&self) -> Rc<dyn DataChangeListener> { self.model.clone() }

  pub fn channel(&self) -> &NotificationChannel { &self.channel }

  // ── Display ───────────────────────────────────────────────────────────

  /// Load the full collection from the service.
  pub fn update_table_view(&self) -> Result<()> { self.model.reload() }

  pub fn items(&self) -> Ref<'_, Vec<E>> { self.model.items.borrow() }

  /// Number of reloads performed so far.
  pub fn reloads(&self) -> usize { self.model.reloads.get() }

  /// The list-level message (a failed removal or load), if any.
  pub fn message(&self) -> Option<String> { self.model.message.borrow().clone() }

  pub fn clear_message(&self) { self.model.message.borrow_mut().take(); }

  // ── Dialogs ───────────────────────────────────────────────────────────

  /// Open `form` as a modal child of this list's window, bound to `entity`.
  ///
  /// Pass a default entity to create, or a row's entity to edit.
  pub fn create_dialog_form<F>(&self, entity: E, form: F) -> Result<FormController<F>>
  where
    F: Form<Entity = E>,
  {
    let service = self.model.service.borrow().clone().ok_or(Error::Unbound("service"))?;
    let mut controller = FormController::new(form);
    controller.set_entity(entity);
    controller.subscribe_all(&self.channel);
    controller.update_form_data()?;
    controller.set_service(service);
    controller.load_associated_objects()?;
    controller.show(&self.window);
    Ok(controller)
  }

  // ── Removal ───────────────────────────────────────────────────────────

  /// Ask for confirmation before deleting `entity`.
  pub fn request_remove(&mut self, entity: E) { self.pending = Some(entity); }

  /// The row awaiting confirmation.
  pub fn pending_removal(&self) -> Option<&E> { self.pending.as_ref() }

  /// Apply the user's answer to the pending removal.
  pub fn resolve_removal(&mut self, confirmed: bool) -> Result<RemoveOutcome> {
    match self.pending.take() {
      Some(entity) if confirmed => self.remove_entity(&entity),
      _ => Ok(RemoveOutcome::Cancelled),
    }
  }

  /// Delete `entity` and notify subscribers.
  ///
  /// On failure the displayed collection is left as it was and the error
  /// becomes the list message.
  pub fn remove_entity(&self, entity: &E) -> Result<RemoveOutcome> {
    let service = self.model.service.borrow().clone().ok_or(Error::Unbound("service"))?;
    match service.remove(entity) {
      Ok(()) => {
        tracing::info!(id = ?entity.id(), "removed");
        self.channel.publish();
        Ok(RemoveOutcome::Removed)
      }
      Err(e) => {
        tracing::warn!(id = ?entity.id(), error = %e, "remove failed");
        self.model.set_message(format!("Error removing object: {e}"));
        Ok(RemoveOutcome::Failed)
      }
    }
  }
}
