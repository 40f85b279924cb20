//! Application state shared across handlers

use crate::service::IdentityService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState<U, C, M, K> {
    pub identity: IdentityService<U, C, M, K>,
}

impl<U, C, M, K> AppState<U, C, M, K> {
    pub fn new(identity: IdentityService<U, C, M, K>) -> Self {
        Self { identity }
    }
}
