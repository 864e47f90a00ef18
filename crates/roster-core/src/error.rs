//! Error types for `roster-core`.

use thiserror::Error;

/// A failure reported by a [`Service`](crate::service::Service).
///
/// The two classes matter to callers: a storage failure is operational and
/// may be retried, an integrity failure means the operation would break a
/// reference held by another record.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("{0}")]
  Integrity(String),

  #[error("no record with id {0}")]
  NotFound(i64),
}

impl ServiceError {
  /// Wrap any error as a storage failure.
  pub fn storage(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self::Storage(e.into())
  }

  pub fn is_integrity(&self) -> bool { matches!(self, Self::Integrity(_)) }
}

/// Wiring failures and list-level service failures.
///
/// [`Error::Unbound`] and [`Error::Closed`] mean the surrounding application
/// wired a controller wrongly. They are not recoverable at runtime and are
/// meant to be propagated all the way out.
#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} is not set")]
  Unbound(&'static str),

  #[error("form is already closed")]
  Closed,

  #[error(transparent)]
  Service(#[from] ServiceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
