//! Test fixtures: a recording in-memory service with failure injection.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use crate::{entity::Entity, error::ServiceError, notify::DataChangeListener, service::Service};

pub struct MemoryService<E> {
  rows:          RefCell<Vec<E>>,
  next_id:       Cell<i64>,
  saved_ids:     RefCell<Vec<Option<i64>>>,
  fail_save:     Cell<bool>,
  fail_find_all: Cell<bool>,
  referenced:    RefCell<Vec<i64>>,
  remove_calls:  Cell<usize>,
}

impl<E: Entity> MemoryService<E> {
  pub fn new() -> Self { Self::with(Vec::new()) }

  pub fn with(rows: Vec<E>) -> Self {
    let next_id = rows.iter().filter_map(|e| e.id()).max().unwrap_or(0) + 1;
    Self {
      rows:          RefCell::new(rows),
      next_id:       Cell::new(next_id),
      saved_ids:     RefCell::new(Vec::new()),
      fail_save:     Cell::new(false),
      fail_find_all: Cell::new(false),
      referenced:    RefCell::new(Vec::new()),
      remove_calls:  Cell::new(0),
    }
  }

  pub fn rows(&self) -> Vec<E> { self.rows.borrow().clone() }

  /// Number of `save_or_update` calls, failed ones included.
  pub fn save_calls(&self) -> usize { self.saved_ids.borrow().len() }

  /// The candidate id passed to each `save_or_update` call.
  pub fn saved_ids(&self) -> Vec<Option<i64>> { self.saved_ids.borrow().clone() }

  pub fn remove_calls(&self) -> usize { self.remove_calls.get() }

  pub fn fail_next_save(&self) { self.fail_save.set(true); }

  pub fn fail_find_all(&self, fail: bool) { self.fail_find_all.set(fail); }

  /// Make `remove` of `id` fail as if another record referenced it.
  pub fn mark_referenced(&self, id: i64) { self.referenced.borrow_mut().push(id); }
}

impl<E: Entity> Service<E> for MemoryService<E> {
  fn find_all(&self) -> Result<Vec<E>, ServiceError> {
    if self.fail_find_all.get() {
      return Err(ServiceError::storage("connection lost"));
    }
    Ok(self.rows())
  }

  fn find_by_id(&self, id: i64) -> Result<Option<E>, ServiceError> {
    Ok(self.rows.borrow().iter().find(|e| e.id() == Some(id)).cloned())
  }

  fn save_or_update(&self, entity: &E) -> Result<E, ServiceError> {
    self.saved_ids.borrow_mut().push(entity.id());
    if self.fail_save.replace(false) {
      return Err(ServiceError::storage("connection lost"));
    }

    let mut rows = self.rows.borrow_mut();
    if entity.is_new() {
      let mut stored = entity.clone();
      stored.set_id(self.next_id.get());
      self.next_id.set(self.next_id.get() + 1);
      rows.push(stored.clone());
      return Ok(stored);
    }
    let slot = rows
      .iter_mut()
      .find(|e| e.id() == entity.id())
      .ok_or(ServiceError::NotFound(entity.id().unwrap_or_default()))?;
    *slot = entity.clone();
    Ok(entity.clone())
  }

  fn remove(&self, entity: &E) -> Result<(), ServiceError> {
    self.remove_calls.set(self.remove_calls.get() + 1);
    let id = entity.id().unwrap_or_default();
    if self.referenced.borrow().contains(&id) {
      return Err(ServiceError::Integrity("record is still referenced".into()));
    }
    let mut rows = self.rows.borrow_mut();
    let before = rows.len();
    rows.retain(|e| e.id() != Some(id));
    if rows.len() == before {
      return Err(ServiceError::NotFound(id));
    }
    Ok(())
  }
}

/// A listener that counts its invocations.
pub fn counter() -> (Rc<Cell<usize>>, Rc<dyn DataChangeListener>) {
  let hits = Rc::new(Cell::new(0));
  let listener: Rc<dyn DataChangeListener> = {
    let hits = hits.clone();
    Rc::new(move || hits.set(hits.get() + 1))
  };
  (hits, listener)
}
