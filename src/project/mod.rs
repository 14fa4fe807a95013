//! Project context: the organizational container for sprints and stories.
//!
//! Projects are administered outside the lifecycle engine; the engine reads
//! them to resolve sprint creation by unique project name, to verify that a
//! story's project exists, and to consult role membership. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
