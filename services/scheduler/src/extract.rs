//! Request extractors

use axum::extract::FromRequest;

use crate::error::SchedulerError;

/// `Json` whose rejections are reported as validation errors
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(SchedulerError))]
pub struct AppJson<T>(pub T);
