//! Diesel and pool error mapping onto repository error constructors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure into the repository's connection error.
pub(super) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    debug!(%error, "connection pool failure");
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure into query or connection errors.
///
/// Database diagnostics are logged at debug level and never copied into the
/// returned message.
pub(super) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("duplicate property id")
        }
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            query("property row could not be converted")
        }
        _ => query("database error"),
    }
}
