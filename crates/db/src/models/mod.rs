//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching the table row and the
//! conversion into the domain aggregate from `inkwell_core`.

pub mod document;
