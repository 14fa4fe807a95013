//! Port contracts for the identity collaborator.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
