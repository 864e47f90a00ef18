//! SQLite backend for the Roster department/seller manager.
//!
//! Wraps a single [`rusqlite::Connection`]. All calls are synchronous, in
//! line with the single-threaded controllers in `roster-core`.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
