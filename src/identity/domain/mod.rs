//! Domain model for the identity collaborator.

mod error;
mod ids;

pub use error::IdentityDomainError;
pub use ids::UserId;
