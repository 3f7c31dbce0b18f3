//! Store Module - Model artifact format and persistence

pub mod artifact;
pub mod storage;
pub mod validate;

#[cfg(test)]
mod tests;

pub use artifact::{templates_checksum, ModelArtifact, FORMAT_VERSION};
pub use storage::{FileModelStore, ModelStore};
pub use validate::validate_artifact;
