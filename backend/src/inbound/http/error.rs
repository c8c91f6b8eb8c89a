//! HTTP mapping for domain errors.
//!
//! The domain error stays transport agnostic; this module turns it into a
//! JSON body and status code, echoing the trace id header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace internal and store diagnostics with a generic message.
fn redact(error: &Error) -> Error {
    let replacement = match error.code() {
        ErrorCode::InternalError => Error::internal("Internal server error"),
        ErrorCode::ServiceUnavailable => {
            Error::service_unavailable("Property store temporarily unavailable")
        }
        _ => return error.clone(),
    };
    match error.trace_id() {
        Some(id) => replacement.with_trace_id(id.to_owned()),
        None => replacement,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(trace_id = ?self.trace_id(), message = self.message(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(trace_id = ?self.trace_id(), message = self.message(), "store unavailable");
            }
            _ => {}
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
