//! User-story lifecycle for the delivery-tracking engine.
//!
//! This context owns the heart of the system: the story status machine,
//! per-project name uniqueness, sprint assignment and evaluation, subtask
//! claiming and completion with status recomputation, and per-developer time
//! recording with a single-slot active-recording token. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
