//! Storage collaborators for the hbnb object model.
//!
//! Implements the `hbnb_core::Storage` contract. Durable engines live outside
//! this workspace; the in-memory store here backs tests and development.

pub mod in_memory;


pub use in_memory::InMemoryStorage;
