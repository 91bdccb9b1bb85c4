//! Inkwell domain core.
//!
//! Pure types and rules shared by the persistence layer and the API server:
//! the document aggregate, its revision history, access decisions, and the
//! collaboration relay message protocol. Nothing in this crate performs I/O.

pub mod access;
pub mod collaboration;
pub mod document;
pub mod error;
pub mod revision;
pub mod types;
