//! Repositories for database operations

pub mod memory;
pub mod session;
pub mod sport;

pub use memory::{MemorySessionRepository, MemorySportRepository};
pub use session::PgSessionRepository;
pub use sport::PgSportRepository;
