//! Sprint scheduling for the delivery-tracking engine.
//!
//! This context owns the sprint calendar: date-range validation, the
//! no-overlap invariant across a project's sprints, deletion guards for
//! sprints that have already started, and the advisory velocity capacity
//! check consumed by planning surfaces. The module follows hexagonal
//! architecture:
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
