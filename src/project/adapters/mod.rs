//! Adapter implementations for project ports.

pub mod memory;

pub use memory::InMemoryProjectRepository;
