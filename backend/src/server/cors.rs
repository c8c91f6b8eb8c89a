//! Cross-origin access for the browser frontend.

use actix_cors::Cors;
use actix_web::http::{Method, header};
use tracing::info;

use deshidwell::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 60 * 60;

/// CORS policy for the API.
///
/// With no configured origins, or with `*` among them, any origin may call
/// the API. Otherwise only the listed origins are accepted. The `trace-id`
/// header is exposed so the frontend can report it alongside errors.
pub(super) fn cors_policy(origins: &[String]) -> Cors {
    let cors = if allows_any(origins) {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
    .allowed_header(TRACE_ID_HEADER)
    .expose_headers([TRACE_ID_HEADER])
    .max_age(PREFLIGHT_MAX_AGE_SECS)
}

fn allows_any(origins: &[String]) -> bool {
    origins.is_empty() || origins.iter().any(|origin| origin == "*")
}

/// Log the effective policy once at startup.
pub(super) fn log_policy(origins: &[String]) {
    if allows_any(origins) {
        info!("CORS allows any origin");
    } else {
        info!(origins = ?origins, "CORS restricted to configured origins");
    }
}
