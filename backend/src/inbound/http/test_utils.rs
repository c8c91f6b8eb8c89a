//! Helpers for HTTP handler tests.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::{Property, PropertyService};
use crate::inbound::http::properties::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryPropertyRepository;

/// Clock pinned to one instant.
pub(crate) struct FixtureClock(pub DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// HTTP state over an in-memory store seeded with `properties`.
pub(crate) fn in_memory_state(
    properties: Vec<Property>,
    now: DateTime<Utc>,
) -> web::Data<HttpState> {
    let repo = Arc::new(InMemoryPropertyRepository::with_properties(properties));
    let service = Arc::new(PropertyService::new(repo, Arc::new(FixtureClock(now))));
    web::Data::new(HttpState::new(service.clone(), service))
}

/// Initialise the `/api` routes over `state`.
pub(crate) async fn init_api(
    state: web::Data<HttpState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(state)
            .service(web::scope("/api").configure(configure)),
    )
    .await
}
