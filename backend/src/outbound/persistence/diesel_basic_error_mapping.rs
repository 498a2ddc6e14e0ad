//! Shared Diesel error mapping for the SQLite repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
///
/// A panicked or cancelled blocking task is reported the same way as a
/// failed checkout: the store could not be reached.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message }
        | PoolError::Task { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Whether `error` reports a rejected foreign key reference.
///
/// SQLite surfaces the violation as `FOREIGN KEY constraint failed`; the
/// message check covers drivers that do not classify the extended code.
pub fn is_foreign_key_violation(error: &DieselError) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => true,
        DieselError::DatabaseError(_, info) => info
            .message()
            .to_ascii_lowercase()
            .contains("foreign key constraint"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(
            error,
            |m| Mapped::Query(m.to_owned()),
            |m| Mapped::Connection(m.to_owned()),
        )
    }

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(map(DieselError::NotFound), Mapped::Query("record not found".into()));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = database_error(DatabaseErrorKind::ClosedConnection, "gone");
        assert_eq!(
            map(error),
            Mapped::Connection("database connection error".into())
        );
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::task("worker panicked"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("worker panicked".into()));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation, "x"), true)]
    #[case(database_error(DatabaseErrorKind::Unknown, "FOREIGN KEY constraint failed"), true)]
    #[case(database_error(DatabaseErrorKind::CheckViolation, "CHECK constraint failed"), false)]
    #[case(DieselError::NotFound, false)]
    fn detects_foreign_key_violations(#[case] error: DieselError, #[case] expected: bool) {
        assert_eq!(is_foreign_key_violation(&error), expected);
    }
}
