//! Core types and controllers for the Roster department/seller manager.
//!
//! This crate has no terminal or database dependencies.
//! It owns the single-record edit transaction: a list controller opens a
//! modal form, the form validates raw input into a candidate entity, commits
//! it through a [`Service`](service::Service), and fans a change
//! notification out to every interested view.

pub mod entity;
pub mod error;
pub mod form;
pub mod list;
pub mod modal;
pub mod notify;
pub mod service;
pub mod table;
pub mod validation;

pub use error::{Error, Result, ServiceError};

#[cfg(test)]
mod testing;
