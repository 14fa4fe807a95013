//! Burndown: agile delivery lifecycle engine.
//!
//! This crate implements the core of an agile delivery tracker: projects,
//! sprints, user stories, subtasks, and per-developer time recording. The
//! HTTP layer, authentication, presentation, and the persistent document
//! store are external collaborators reached through ports.
//!
//! # Architecture
//!
//! Burndown follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (stores, directories)
//!
//! # Modules
//!
//! - [`identity`]: Opaque developer identifiers and display-name resolution
//! - [`project`]: Organizational container for sprints and stories
//! - [`sprint`]: Sprint calendar, overlap invariants, and capacity checks
//! - [`story`]: Story status machine, subtasks, and time recording

pub mod identity;
pub mod project;
pub mod sprint;
pub mod story;

#[cfg(test)]
pub(crate) mod testing;
