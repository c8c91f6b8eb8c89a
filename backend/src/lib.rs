//! DeshiDwell rental listing backend.
//!
//! Layout follows ports and adapters: `domain` owns listings, filters and
//! the service; `inbound` exposes them over HTTP; `outbound` stores them in
//! PostgreSQL or in memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
