//! Process-local property store.

mod in_memory_property_repository;

pub use in_memory_property_repository::InMemoryPropertyRepository;
