//! Storage adapters implementing the domain's driven ports.

pub mod json_store;
pub mod memory;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
