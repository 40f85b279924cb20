//! Sport session scheduling service
//!
//! Administrators manage a catalog of sports and schedule sessions with a
//! roster of invited players; players join sessions or cancel with a reason.

pub mod config;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod models;
pub mod repositories;
pub mod roster;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use error::{SchedulerError, SchedulerResult};
pub use routes::create_router;
pub use state::AppState;
