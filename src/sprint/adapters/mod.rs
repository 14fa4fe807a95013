//! Adapter implementations for sprint ports.

pub mod memory;

pub use memory::InMemorySprintRepository;
