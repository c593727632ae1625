//! sqlx error mapping.

use roomescape_core::error::{AppError, ErrorKind};
use tracing::warn;

/// Map a sqlx error to an [`AppError`].
///
/// Unique-constraint violations become [`ErrorKind::Duplication`]: the
/// application-level existence checks can race, and the constraint is what
/// finally rejects the second writer.
pub fn map_sqlx(context: &'static str, err: sqlx::Error) -> AppError {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique {
        warn!(error = %err, "{context}: unique constraint rejected write");
        return AppError::with_source(ErrorKind::Duplication, context, err);
    }

    AppError::with_source(ErrorKind::Database, context, err)
}
