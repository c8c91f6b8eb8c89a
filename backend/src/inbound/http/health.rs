//! Health endpoints.
//!
//! `/health/ready` and `/health/live` are orchestration probes driven by
//! [`HealthState`]. `GET /api/health` is the client-facing status check.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Readiness and liveness flags shared with the probes.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start live but not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready once adapters are built and the socket is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail both probes while draining for shutdown.
    pub fn mark_unhealthy(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe: 200 once the server can handle traffic, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "DeshiDwell API is running")]
    pub message: String,
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: DateTime<Utc>,
}

/// Client-facing status check.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    responses((status = 200, description = "API is running", body = ApiHealthResponse))
)]
#[get("/health")]
pub async fn api_health() -> web::Json<ApiHealthResponse> {
    web::Json(ApiHealthResponse {
        status: "ok".to_owned(),
        message: "DeshiDwell API is running".to_owned(),
        timestamp: Utc::now(),
    })
}
