//! In-memory repositories
//!
//! Same contract as the PostgreSQL repositories, kept in insertion order.
//! Used by the test suites and for running the service without a database.

use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{Session, Sport},
    roster,
    store::{SessionStore, SportStore},
};

#[derive(Debug, Clone, Default)]
pub struct MemorySportRepository {
    sports: Arc<RwLock<Vec<Sport>>>,
}

impl MemorySportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_first(&self, predicate: impl Fn(&Sport) -> bool) -> Option<Sport> {
        self.sports
            .read()
            .await
            .iter()
            .find(|sport| predicate(sport))
            .cloned()
    }
}

/// Mirrors the unique `lower(name)` index
fn name_taken(sports: &[Sport], candidate: &Sport) -> bool {
    let wanted = candidate.name.to_lowercase();
    sports
        .iter()
        .any(|sport| sport.id != candidate.id && sport.name.to_lowercase() == wanted)
}

impl SportStore for MemorySportRepository {
    async fn list(&self) -> DatabaseResult<Vec<Sport>> {
        Ok(self.sports.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Sport>> {
        Ok(self.find_first(|sport| sport.id == id).await)
    }

    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Sport>> {
        Ok(self.find_first(|sport| sport.name == name).await)
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> DatabaseResult<Option<Sport>> {
        let wanted = name.to_lowercase();
        Ok(self
            .find_first(|sport| sport.name.to_lowercase() == wanted)
            .await)
    }

    async fn insert(&self, sport: &Sport) -> DatabaseResult<()> {
        let mut sports = self.sports.write().await;
        if name_taken(&sports, sport) {
            return Err(DatabaseError::Duplicate("sports"));
        }
        sports.push(sport.clone());
        Ok(())
    }

    async fn save(&self, sport: &Sport) -> DatabaseResult<bool> {
        let mut sports = self.sports.write().await;
        if name_taken(&sports, sport) {
            return Err(DatabaseError::Duplicate("sports"));
        }
        match sports.iter_mut().find(|stored| stored.id == sport.id) {
            Some(stored) => {
                *stored = sport.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut sports = self.sports.write().await;
        let before = sports.len();
        sports.retain(|sport| sport.id != id);
        Ok(sports.len() != before)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionRepository {
    sessions: Arc<RwLock<Vec<Session>>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(&self, predicate: impl Fn(&Session) -> bool) -> Vec<Session> {
        self.sessions
            .read()
            .await
            .iter()
            .filter(|session| predicate(session))
            .cloned()
            .collect()
    }
}

impl SessionStore for MemorySessionRepository {
    async fn insert(&self, session: &Session) -> DatabaseResult<()> {
        self.sessions.write().await.push(session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Session>> {
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .find(|session| session.id == id)
            .cloned())
    }

    async fn save(&self, session: &Session) -> DatabaseResult<bool> {
        let mut sessions = self.sessions.write().await;
        match sessions.iter_mut().find(|stored| stored.id == session.id) {
            Some(stored) => {
                *stored = session.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|session| session.id != id);
        Ok(sessions.len() != before)
    }

    async fn list_all(&self) -> DatabaseResult<Vec<Session>> {
        Ok(self.sessions.read().await.clone())
    }

    async fn list_by_player(&self, email: &str) -> DatabaseResult<Vec<Session>> {
        Ok(self
            .filtered(|session| roster::find(&session.roster, email).is_some())
            .await)
    }

    async fn list_with_cancellations(&self) -> DatabaseResult<Vec<Session>> {
        Ok(self
            .filtered(|session| session.roster.iter().any(|entry| entry.cancelled))
            .await)
    }
}
