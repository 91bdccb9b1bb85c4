//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod document_repo;
pub mod user_repo;

pub use document_repo::DocumentRepo;
pub use user_repo::UserRepo;
