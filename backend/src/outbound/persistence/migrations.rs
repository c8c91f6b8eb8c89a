//! Embedded schema migrations.
//!
//! Migrations run once at startup on a dedicated synchronous connection,
//! moved onto a blocking thread so the async runtime is not stalled.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

fn apply(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| applied.len())
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })
}

/// Apply every pending migration to the database at `database_url`.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply(&url))
        .await
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations complete");
    Ok(())
}
