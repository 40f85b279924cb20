//! Application state shared across handlers

use crate::{
    services::{SessionService, SportService},
    store::{SessionStore, SportStore},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState<S, P> {
    pub sessions: SessionService<S, P>,
    pub sports: SportService<P>,
}

impl<S, P> AppState<S, P>
where
    S: SessionStore,
    P: SportStore + Clone,
{
    pub fn new(session_store: S, sport_store: P) -> Self {
        Self {
            sessions: SessionService::new(session_store, sport_store.clone()),
            sports: SportService::new(sport_store),
        }
    }
}
