//! Custom error types for the common library
//!
//! Every record store in the workspace reports failures through
//! [`DatabaseError`], whether it is backed by PostgreSQL or held in memory.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for record store operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[from] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A stored row could not be turned back into a record
    #[error("Corrupt record in {collection}: {reason}")]
    Decode { collection: &'static str, reason: String },

    /// A unique constraint on the collection rejected the write
    #[error("Duplicate record in {0}")]
    Duplicate(&'static str),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Map a write error, turning unique violations on `collection` into
/// [`DatabaseError::Duplicate`]
pub fn map_unique_violation(collection: &'static str) -> impl FnOnce(SqlxError) -> DatabaseError {
    move |e| {
        let duplicate = matches!(
            &e,
            SqlxError::Database(db) if db.code() == Some(UNIQUE_VIOLATION.into())
        );
        if duplicate {
            DatabaseError::Duplicate(collection)
        } else {
            DatabaseError::Query(e)
        }
    }
}

/// Failure taxonomy shared by the services.
///
/// Each service error maps onto one of these so the HTTP layers agree on
/// status codes and on which failures hide their details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced record does not exist
    NotFound,
    /// Malformed or missing input
    Validation,
    /// The request collides with existing state
    Conflict,
    /// The record is not in a state that allows the operation
    StateError,
    /// The record store, cache or mail relay failed
    Dependency,
}

impl ErrorKind {
    /// HTTP status code for this kind
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::StateError => 400,
            ErrorKind::Dependency => 500,
        }
    }
}
