//! The persistence boundary controllers talk to.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Controllers hold an `Rc<dyn Service<E>>` and never see the backend.

use std::rc::Rc;

use crate::{entity::Entity, error::ServiceError};

/// Create, read, update and delete for one entity type.
///
/// Calls are synchronous: they block the caller until the backend answers.
/// A failed call must leave the persisted data as it was.
pub trait Service<E: Entity> {
  /// Every record, in whatever order the backend yields them.
  fn find_all(&self) -> Result<Vec<E>, ServiceError>;

  /// A single record by id. Returns `None` if not found.
  fn find_by_id(&self, id: i64) -> Result<Option<E>, ServiceError>;

  /// Insert `entity` if it is new, otherwise update the record with its id.
  ///
  /// Returns the stored entity, with identity assigned on insert.
  fn save_or_update(&self, entity: &E) -> Result<E, ServiceError>;

  /// Delete the record with `entity`'s id.
  ///
  /// Fails with [`ServiceError::Integrity`] if another record still refers
  /// to it. Nothing is cascaded.
  fn remove(&self, entity: &E) -> Result<(), ServiceError>;
}

/// Shared handle to a service, as held by controllers.
pub type SharedService<E> = Rc<dyn Service<E>>;
