//! Correlation id for one HTTP request.
//!
//! The `Trace` middleware either adopts the caller's `trace-id` header or
//! mints a fresh id, then runs the handler inside [`TraceId::scope`]. Errors
//! built anywhere below the handler pick the id up through
//! [`TraceId::current`], so the JSON error body and the response header agree.
//!
//! The id lives in a tokio task-local: work moved onto another task must be
//! wrapped in its own `scope` call to keep it.

use std::fmt;
use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Header read from requests and written to every response.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request in logs, error bodies and the `trace-id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint an id for a request that arrived without one.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Adopt a caller-supplied header value.
    ///
    /// Any textual UUID form is accepted and echoed back hyphenated in lower
    /// case. The nil UUID is refused since every caller sending it would share
    /// one id.
    pub fn from_header(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim())
            .ok()
            .filter(|uuid| !uuid.is_nil())
            .map(Self)
    }

    /// Id of the request being served on this task, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `self` as the current id.
    pub async fn scope<Fut: Future>(self, fut: Fut) -> Fut::Output {
        CURRENT.scope(self, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}
