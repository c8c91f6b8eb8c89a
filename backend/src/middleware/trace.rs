//! Request tracing middleware.
//!
//! Every request runs with a [`TraceId`] in task-local scope and every
//! response carries it in the `trace-id` header. A well-formed `trace-id`
//! sent by the caller is reused so log lines can be joined across hops.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{Ready, ready};
use tracing::{Instrument, debug, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

fn incoming_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(TraceId::from_header)
}

/// Middleware scoping a [`TraceId`] around each request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use deshidwell::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`]; not used directly.
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = incoming_trace_id(&req).unwrap_or_else(TraceId::generate);
        let span = info_span!(
            "http_request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = trace_id.scope(self.service.call(req));

        Box::pin(
            async move {
                let mut res = fut.await?;
                debug!(status = res.status().as_u16(), "request completed");
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => warn!(%error, "trace id is not a valid header value"),
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}
