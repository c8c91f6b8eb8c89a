//! Domain ports and supporting types for the hexagonal boundary.
//!
//! `PropertyRepository` is the driven port implemented by the PostgreSQL and
//! in-memory adapters. `PropertyCommand` and `PropertyQuery` are the driving
//! ports consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod property_command;
mod property_query;
mod property_repository;

#[cfg(test)]
pub use property_command::MockPropertyCommand;
pub use property_command::{DeletedProperty, PropertyCommand, PropertyDraft, PropertyPatch};
#[cfg(test)]
pub use property_query::MockPropertyQuery;
pub use property_query::PropertyQuery;
#[cfg(test)]
pub use property_repository::MockPropertyRepository;
pub use property_repository::{PropertyRepository, PropertyRepositoryError};
