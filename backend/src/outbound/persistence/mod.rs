//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the `PropertyRepository` implementation backed by PostgreSQL via
//! `diesel-async` with `bb8` connection pooling, plus embedded schema
//! migrations.
//!
//! - Row structs (`models.rs`) and the table definition (`schema.rs`) stay
//!   internal; only domain types cross the port.
//! - Listing predicates are translated into boxed Diesel expressions by
//!   `predicate_sql`.
//! - Pool and Diesel failures map onto `PropertyRepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use deshidwell::outbound::persistence::{DbPool, DieselPropertyRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/deshidwell")).await?;
//! let repo = DieselPropertyRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_property_repository;
mod migrations;
mod models;
mod pool;
mod predicate_sql;
mod schema;

pub use diesel_property_repository::DieselPropertyRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
