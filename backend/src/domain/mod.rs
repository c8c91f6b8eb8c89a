//! Domain primitives, ports and services.
//!
//! Purpose: define the property listing aggregate, the typed filter criteria
//! with the predicate every evaluator shares, and the service driving the
//! persistence port. Nothing here depends on HTTP or PostgreSQL.
//!
//! Public surface:
//! - `Property`, `PropertyId`, `OwnerId`, `Price`, `PropertyType`: listing
//!   aggregate and value types.
//! - `PropertyFilter`, `PropertyPredicate`, `filter_properties`: search.
//! - `PropertyService`: implements the `PropertyCommand`/`PropertyQuery`
//!   driving ports over a `PropertyRepository`.
//! - `Error`, `ErrorCode`, `TraceId`: error payload and correlation.

pub mod error;
pub mod filter;
pub mod ports;
pub mod property;
pub mod property_service;
pub mod trace_id;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::error::{Error, ErrorCode};
pub use self::filter::{FilterParams, PropertyFilter, PropertyPredicate, TextField, filter_properties};
pub use self::property::{
    OwnerId, Price, Property, PropertyId, PropertyRecord, PropertyType, PropertyValidationError,
    UnknownPropertyType, property_type_label,
};
pub use self::property_service::PropertyService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
