//! OpenAPI schemas for domain types.
//!
//! Domain types stay free of `ToSchema`; these wrappers mirror them and are
//! registered under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Missing or malformed input.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Unknown or malformed listing id.
    #[schema(rename = "not_found")]
    NotFound,
    /// The property store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Missing required fields: price")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// For validation failures: `{"code": "missing_fields", "fields": [...]}`.
    details: Option<serde_json::Value>,
}
