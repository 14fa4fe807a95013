//! Identity collaborator for the delivery-tracking engine.
//!
//! Identity issuance and authentication live outside this crate. This context
//! models only what the engine consumes: the opaque developer identifier
//! carried on assignments and work-time entries, and the directory port used
//! to resolve an identifier to a display name. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
