//! Adapter implementations for story ports.

pub mod memory;

pub use memory::InMemoryStoryRepository;
