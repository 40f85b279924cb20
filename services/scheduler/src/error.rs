//! Error types for the scheduler service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::{DatabaseError, ErrorKind};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::roster::RosterError;

/// Failures of the session and sport operations
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Sport not found")]
    SportNotFound,

    #[error("Sport does not exist")]
    UnknownSport,

    #[error("Invalid date or time")]
    InvalidDateTime,

    #[error("Sport already exists")]
    DuplicateName,

    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("Record store error: {0}")]
    Store(DatabaseError),
}

impl SchedulerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedulerError::SessionNotFound | SchedulerError::SportNotFound => ErrorKind::NotFound,
            SchedulerError::UnknownSport
            | SchedulerError::InvalidDateTime
            | SchedulerError::DuplicateName
            | SchedulerError::Validation(_) => ErrorKind::Validation,
            SchedulerError::Roster(RosterError::AlreadyJoined) => ErrorKind::Conflict,
            SchedulerError::Roster(_) => ErrorKind::StateError,
            SchedulerError::Store(_) => ErrorKind::Dependency,
        }
    }
}

impl From<DatabaseError> for SchedulerError {
    fn from(err: DatabaseError) -> Self {
        match err {
            // The unique name index caught a concurrent add or rename
            DatabaseError::Duplicate("sports") => SchedulerError::DuplicateName,
            other => SchedulerError::Store(other),
        }
    }
}

impl From<JsonRejection> for SchedulerError {
    fn from(rejection: JsonRejection) -> Self {
        SchedulerError::Validation(rejection.body_text())
    }
}

impl IntoResponse for SchedulerError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = StatusCode::from_u16(kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if kind == ErrorKind::Dependency {
            error!("Scheduler dependency failure: {}", self);
            if cfg!(debug_assertions) {
                json!({ "message": "Server error", "error": self.to_string() })
            } else {
                json!({ "message": "Server error" })
            }
        } else {
            json!({ "message": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for scheduler results
pub type SchedulerResult<T> = Result<T, SchedulerError>;
