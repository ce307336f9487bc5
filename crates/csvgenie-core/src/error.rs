//! Typed errors for the matching engine.
//!
//! Only catalog construction and catalog availability can fail; every
//! per-line outcome is a first-class [`UnmappedItem`](crate::models::UnmappedItem),
//! never an error.

use thiserror::Error;

/// Errors raised while building a [`CatalogIndex`](crate::catalog::CatalogIndex).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two catalog entries share the same code.
    #[error("duplicate catalog code: {code}")]
    DuplicateCode { code: String },
}

/// Errors that abort a whole [`process`](crate::process::OrderProcessor::process) call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The catalog index holds no entries; refusing to match against nothing.
    #[error("CATALOG_UNAVAILABLE: the catalog index is empty")]
    CatalogUnavailable,
}
