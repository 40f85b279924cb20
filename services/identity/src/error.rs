//! Error types for the identity service

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

use crate::mailer::MailError;

/// Failures of the account flows
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Email not verified")]
    NotVerified,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("No verification code found")]
    NoCodeFound,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("Error sending email: {0}")]
    MailRelay(#[from] MailError),

    #[error("Record store error: {0}")]
    Store(DatabaseError),

    #[error(transparent)]
    CodeStore(#[from] anyhow::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<DatabaseError> for IdentityError {
    fn from(err: DatabaseError) -> Self {
        match err {
            // Two signups raced past the existence check
            DatabaseError::Duplicate("users") => IdentityError::EmailTaken,
            other => IdentityError::Store(other),
        }
    }
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::EmailTaken => ErrorKind::Conflict,
            IdentityError::Validation(_) => ErrorKind::Validation,
            // Unknown accounts answer 400 like the other credential failures.
            IdentityError::UserNotFound
            | IdentityError::NotVerified
            | IdentityError::IncorrectPassword
            | IdentityError::NoCodeFound
            | IdentityError::InvalidCode
            | IdentityError::InvalidOrExpiredToken => ErrorKind::StateError,
            IdentityError::MailRelay(_)
            | IdentityError::Store(_)
            | IdentityError::CodeStore(_)
            | IdentityError::Hashing(_) => ErrorKind::Dependency,
        }
    }

    fn public_message(&self) -> String {
        match self {
            IdentityError::MailRelay(_) => "Error sending email".to_string(),
            e if e.kind() == ErrorKind::Dependency => "Server error".to_string(),
            e => e.to_string(),
        }
    }
}

impl From<JsonRejection> for IdentityError {
    fn from(rejection: JsonRejection) -> Self {
        IdentityError::Validation(rejection.body_text())
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = StatusCode::from_u16(kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.public_message();

        let body = if kind == ErrorKind::Dependency {
            error!("Identity dependency failure: {}", self);
            if cfg!(debug_assertions) {
                json!({ "message": message, "error": self.to_string() })
            } else {
                json!({ "message": message })
            }
        } else {
            json!({ "message": message })
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for identity results
pub type IdentityResult<T> = Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(IdentityError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(IdentityError::InvalidCode.kind(), ErrorKind::StateError);
        assert_eq!(
            IdentityError::Validation("Email is required".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            IdentityError::from(MailError::NotConfigured("SMTP host")).kind(),
            ErrorKind::Dependency
        );
        assert!(matches!(
            IdentityError::from(DatabaseError::Duplicate("users")),
            IdentityError::EmailTaken
        ));
    }

    #[test]
    fn test_status_codes() {
        let response = IdentityError::EmailTaken.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = IdentityError::UserNotFound.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = IdentityError::Store(DatabaseError::Migration("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_dependency_messages_stay_generic() {
        let mail = IdentityError::from(MailError::Other("relay down".into()));
        assert_eq!(mail.public_message(), "Error sending email");

        let store = IdentityError::Hashing("bad params".into());
        assert_eq!(store.public_message(), "Server error");

        assert_eq!(
            IdentityError::NotVerified.public_message(),
            "Email not verified"
        );
    }
}
