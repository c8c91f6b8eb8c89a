//! Builders for the HTTP state from the configured property store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use deshidwell::domain::PropertyService;
use deshidwell::domain::ports::{PropertyCommand, PropertyQuery, PropertyRepository};
use deshidwell::inbound::http::state::HttpState;
use deshidwell::outbound::memory::InMemoryPropertyRepository;
use deshidwell::outbound::persistence::{DbPool, DieselPropertyRepository};

use super::ServerConfig;

fn service_pair<R>(
    repo: R,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn PropertyCommand>, Arc<dyn PropertyQuery>)
where
    R: PropertyRepository + 'static,
{
    let service = Arc::new(PropertyService::new(Arc::new(repo), clock));
    (
        service.clone() as Arc<dyn PropertyCommand>,
        service as Arc<dyn PropertyQuery>,
    )
}

/// Select the Diesel repository when a pool is present, otherwise keep
/// listings in process memory.
fn build_property_ports(
    pool: Option<&DbPool>,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn PropertyCommand>, Arc<dyn PropertyQuery>) {
    match pool {
        Some(pool) => {
            info!("using PostgreSQL property store");
            service_pair(DieselPropertyRepository::new(pool.clone()), clock)
        }
        None => {
            warn!("using in-memory property store; listings are lost on restart");
            service_pair(InMemoryPropertyRepository::new(), clock)
        }
    }
}

/// Build the shared HTTP state for `config`.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (properties, properties_query) =
        build_property_ports(config.db_pool.as_ref(), Arc::new(DefaultClock));
    web::Data::new(HttpState::new(properties, properties_query))
}
