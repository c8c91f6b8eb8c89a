//! Server settings and the startup configuration built from them.
//!
//! Settings load through OrthoConfig with the `DESHIDWELL_` prefix, so each
//! value can come from a CLI flag, an environment variable or a config file.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::{info, warn};

use deshidwell::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Raw settings for the HTTP server and its property store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DESHIDWELL")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Listings are kept in memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Connections kept open while idle.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Comma-separated browser origins allowed to call the API. Any origin
    /// is allowed when unset.
    pub cors_origins: Option<String>,
}

impl ServerSettings {
    /// Socket address to bind, falling back to `0.0.0.0:5000`.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Allowed CORS origins; empty means any origin.
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Pool settings for `database_url` with configured overrides applied.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        let mut config = PoolConfig::new(database_url);
        if let Some(max_size) = self.pool_max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(min_idle) = self.pool_min_idle {
            config = config.with_min_idle(Some(min_idle));
        }
        if let Some(secs) = self.pool_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Construct a configuration listening on `bind_addr` with no database.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            cors_origins: Vec::new(),
        }
    }

    /// Restrict cross-origin access to `origins`; empty allows any origin.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Attach a database connection pool for the Diesel repository.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "read by configuration tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Resolve settings into a ready configuration.
    ///
    /// With a database URL, pending migrations run (unless skipped) and the
    /// pool is built before the server binds.
    ///
    /// # Errors
    /// Returns [`io::Error`] for an invalid bind address, a failed migration
    /// or a pool that cannot be built.
    pub async fn from_settings(settings: &ServerSettings) -> io::Result<Self> {
        let config = Self::new(settings.bind_addr()?).with_cors_origins(settings.cors_origins());
        let Some(database_url) = settings.database_url() else {
            warn!("no database URL configured; listings are kept in memory");
            return Ok(config);
        };

        if settings.skip_migrations {
            info!("skipping database migrations");
        } else {
            run_pending_migrations(database_url)
                .await
                .map_err(io::Error::other)?;
        }

        let pool = DbPool::new(settings.pool_config(database_url))
            .await
            .map_err(io::Error::other)?;
        Ok(config.with_db_pool(pool))
    }
}
