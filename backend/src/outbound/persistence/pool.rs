//! Async connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8`. Checkout respects the configured timeout,
//! so an unreachable database surfaces as `PoolError::Checkout` rather than a
//! hung request.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection could be checked out in time.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be built.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Connection pool settings.
///
/// Defaults: at most 10 connections, 1 kept idle, 5 second checkout timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    pub const DEFAULT_MAX_SIZE: u32 = 10;
    pub const DEFAULT_MIN_IDLE: u32 = 1;
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: Self::DEFAULT_MAX_SIZE,
            min_idle: Some(Self::DEFAULT_MIN_IDLE),
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

/// Async PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` when the pool cannot be constructed, e.g.
    /// the minimum idle connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);

        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if no connection is available within the
    /// configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
