//! Error type for `roster-store-sqlite`.

use roster_core::ServiceError;
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// An update or delete matched no row.
  #[error("no record with id {0}")]
  NotFound(i64),

  /// A required column has no value on the entity being written.
  #[error("seller has no {0}")]
  Incomplete(&'static str),
}

impl Error {
  /// Whether SQLite rejected the statement for breaking a foreign key.
  pub fn is_foreign_key_violation(&self) -> bool {
    matches!(
      self,
      Error::Database(rusqlite::Error::SqliteFailure(e, _))
        if e.code == ErrorCode::ConstraintViolation
          && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
  }
}

impl From<Error> for ServiceError {
  fn from(e: Error) -> Self {
    match e {
      e if e.is_foreign_key_violation() => {
        ServiceError::Integrity("record is referenced by another record".into())
      }
      Error::NotFound(id) => ServiceError::NotFound(id),
      other => ServiceError::storage(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
