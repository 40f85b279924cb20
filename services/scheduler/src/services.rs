//! Session lifecycle and sport catalog services

pub mod sessions;
pub mod sports;

pub use sessions::SessionService;
pub use sports::SportService;
