//! Session lifecycle: create, edit, delete, join, cancel and the listings.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    datetime::parse_session_instant,
    error::{SchedulerError, SchedulerResult},
    models::{CancelledSession, Session, SessionInput},
    roster,
    store::{SessionStore, SportStore},
};

const DEFAULT_CREATED_BY: &str = "admin";

#[derive(Clone)]
pub struct SessionService<S, P> {
    sessions: S,
    sports: P,
}

impl<S: SessionStore, P: SportStore> SessionService<S, P> {
    pub fn new(sessions: S, sports: P) -> Self {
        Self { sessions, sports }
    }

    /// Create a session for an existing sport with every listed player in
    /// the `Listed` state
    pub async fn create(&self, input: SessionInput) -> SchedulerResult<Session> {
        if self.sports.find_by_name(&input.sport).await?.is_none() {
            warn!(sport = %input.sport, "Rejected session for unknown sport");
            return Err(SchedulerError::UnknownSport);
        }

        let date = session_instant(&input)?;
        let venue = required_venue(&input)?;

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            sport: input.sport,
            venue,
            date,
            description: input.description,
            created_by: input
                .created_by
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string()),
            required_players: input.required_players,
            team1: input.team1,
            team2: input.team2,
            roster: roster::initialize(input.player_emails),
            created_at: now,
            updated_at: now,
        };

        self.sessions.insert(&session).await?;
        info!(
            session_id = %session.id,
            sport = %session.sport,
            players = session.roster.len(),
            "Session created"
        );

        Ok(session)
    }

    pub async fn join(&self, id: Uuid, email: &str) -> SchedulerResult<Session> {
        let mut session = self.load(id).await?;

        if let Err(e) = roster::join(&mut session.roster, email) {
            warn!(session_id = %id, email, "Join refused: {}", e);
            return Err(e.into());
        }

        self.persist(&mut session).await?;
        info!(session_id = %id, email, "Player joined session");
        Ok(session)
    }

    pub async fn cancel(
        &self,
        id: Uuid,
        email: &str,
        reason: Option<&str>,
    ) -> SchedulerResult<Session> {
        let mut session = self.load(id).await?;

        if let Err(e) = roster::cancel(&mut session.roster, email, reason) {
            warn!(session_id = %id, email, "Cancel refused: {}", e);
            return Err(e.into());
        }

        self.persist(&mut session).await?;
        info!(session_id = %id, email, "Player cancelled session");
        Ok(session)
    }

    /// Replace every editable field. The roster is rebuilt so players kept
    /// in the list retain their joined/cancelled state.
    pub async fn edit(&self, id: Uuid, input: SessionInput) -> SchedulerResult<Session> {
        let mut session = self.load(id).await?;
        let date = session_instant(&input)?;
        let venue = required_venue(&input)?;
        if input.sport.trim().is_empty() {
            return Err(SchedulerError::Validation("Sport is required".to_string()));
        }

        session.roster = roster::rebuild(&session.roster, input.player_emails);
        session.sport = input.sport;
        session.venue = venue;
        session.date = date;
        session.description = input.description;
        session.required_players = input.required_players;
        session.team1 = input.team1;
        session.team2 = input.team2;

        self.persist(&mut session).await?;
        info!(session_id = %id, players = session.roster.len(), "Session edited");
        Ok(session)
    }

    pub async fn delete(&self, id: Uuid) -> SchedulerResult<()> {
        if !self.sessions.delete(id).await? {
            return Err(SchedulerError::SessionNotFound);
        }

        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    pub async fn list_for_player(&self, email: &str) -> SchedulerResult<Vec<Session>> {
        if email.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.sessions.list_by_player(email).await?)
    }

    pub async fn list_all(&self) -> SchedulerResult<Vec<Session>> {
        Ok(self.sessions.list_all().await?)
    }

    /// Sessions with cancellations, each annotated with its cancelled entries
    pub async fn list_cancellations(&self) -> SchedulerResult<Vec<CancelledSession>> {
        let sessions = self.sessions.list_with_cancellations().await?;

        Ok(sessions
            .into_iter()
            .filter_map(|session| {
                let cancelled_players = roster::cancelled_entries(&session.roster);
                (!cancelled_players.is_empty()).then_some(CancelledSession {
                    session,
                    cancelled_players,
                })
            })
            .collect())
    }

    async fn load(&self, id: Uuid) -> SchedulerResult<Session> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or(SchedulerError::SessionNotFound)
    }

    async fn persist(&self, session: &mut Session) -> SchedulerResult<()> {
        session.updated_at = Utc::now();
        if !self.sessions.save(session).await? {
            // Deleted between load and save.
            return Err(SchedulerError::SessionNotFound);
        }
        Ok(())
    }
}

fn session_instant(input: &SessionInput) -> SchedulerResult<chrono::DateTime<Utc>> {
    parse_session_instant(&input.date, input.time.as_deref())
        .ok_or(SchedulerError::InvalidDateTime)
}

fn required_venue(input: &SessionInput) -> SchedulerResult<String> {
    let venue = input.venue.trim();
    if venue.is_empty() {
        return Err(SchedulerError::Validation("Venue is required".to_string()));
    }
    Ok(venue.to_string())
}
