//! Account service for the sport scheduler
//!
//! Players sign up and verify their email with a mailed code, log in with
//! their password and reset it through a mailed, time-limited link.

pub mod admin;
pub mod clock;
pub mod codes;
pub mod config;
pub mod error;
pub mod extract;
pub mod mailer;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod templates;
pub mod validation;

pub use error::{IdentityError, IdentityResult};
pub use routes::create_router;
pub use service::{AccountSettings, IdentityService};
pub use state::AppState;
