//! Request extractors

use axum::extract::FromRequest;

use crate::error::IdentityError;

/// `Json` whose rejections are reported as validation errors
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(IdentityError))]
pub struct AppJson<T>(pub T);
