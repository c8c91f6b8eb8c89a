//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PropertyCommand, PropertyQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub properties: Arc<dyn PropertyCommand>,
    pub properties_query: Arc<dyn PropertyQuery>,
}

impl HttpState {
    /// Bundle the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use deshidwell::domain::PropertyService;
    /// use deshidwell::inbound::http::state::HttpState;
    /// use deshidwell::outbound::memory::InMemoryPropertyRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(PropertyService::new(
    ///     Arc::new(InMemoryPropertyRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// # drop(state);
    /// ```
    pub fn new(
        properties: Arc<dyn PropertyCommand>,
        properties_query: Arc<dyn PropertyQuery>,
    ) -> Self {
        Self {
            properties,
            properties_query,
        }
    }
}
