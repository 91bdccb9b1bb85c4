pub mod documents;
pub mod info;
