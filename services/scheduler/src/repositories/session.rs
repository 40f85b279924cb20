//! Session repository for database operations
//!
//! Rosters and team lists are stored as JSONB documents on the session row.

use common::error::DatabaseResult;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use tracing::info;
use uuid::Uuid;

use crate::{
    models::{RosterEntry, Session},
    store::SessionStore,
};

const SESSION_COLUMNS: &str = "id, sport, venue, date, description, created_by, required_players, \
                               team1, team2, player_emails, created_at, updated_at";

/// Session repository backed by the `sessions` table
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn session_from_row(row: &PgRow) -> DatabaseResult<Session> {
    let team1: Json<Vec<String>> = row.try_get("team1")?;
    let team2: Json<Vec<String>> = row.try_get("team2")?;
    let roster: Json<Vec<RosterEntry>> = row.try_get("player_emails")?;

    Ok(Session {
        id: row.try_get("id")?,
        sport: row.try_get("sport")?,
        venue: row.try_get("venue")?,
        date: row.try_get("date")?,
        description: row.try_get("description")?,
        created_by: row.try_get("created_by")?,
        required_players: row.try_get("required_players")?,
        team1: team1.0,
        team2: team2.0,
        roster: roster.0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl SessionStore for PgSessionRepository {
    async fn insert(&self, session: &Session) -> DatabaseResult<()> {
        info!(session_id = %session.id, sport = %session.sport, "Inserting session");

        sqlx::query(
            r#"
            INSERT INTO sessions (id, sport, venue, date, description, created_by,
                                  required_players, team1, team2, player_emails,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(session.id)
        .bind(&session.sport)
        .bind(&session.venue)
        .bind(session.date)
        .bind(&session.description)
        .bind(&session.created_by)
        .bind(session.required_players)
        .bind(Json(&session.team1))
        .bind(Json(&session.team2))
        .bind(Json(&session.roster))
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Session>> {
        let query = format!("SELECT {} FROM sessions WHERE id = $1", SESSION_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(session_from_row).transpose()
    }

    async fn save(&self, session: &Session) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET sport = $2, venue = $3, date = $4, description = $5, created_by = $6,
                required_players = $7, team1 = $8, team2 = $9, player_emails = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(session.id)
        .bind(&session.sport)
        .bind(&session.venue)
        .bind(session.date)
        .bind(&session.description)
        .bind(&session.created_by)
        .bind(session.required_players)
        .bind(Json(&session.team1))
        .bind(Json(&session.team2))
        .bind(Json(&session.roster))
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> DatabaseResult<Vec<Session>> {
        let query = format!(
            "SELECT {} FROM sessions ORDER BY created_at, id",
            SESSION_COLUMNS
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(session_from_row).collect()
    }

    async fn list_by_player(&self, email: &str) -> DatabaseResult<Vec<Session>> {
        let query = format!(
            "SELECT {} FROM sessions \
             WHERE player_emails @> jsonb_build_array(jsonb_build_object('email', $1::text)) \
             ORDER BY created_at, id",
            SESSION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(session_from_row).collect()
    }

    async fn list_with_cancellations(&self) -> DatabaseResult<Vec<Session>> {
        let query = format!(
            "SELECT {} FROM sessions \
             WHERE player_emails @> '[{{\"cancelled\": true}}]'::jsonb \
             ORDER BY created_at, id",
            SESSION_COLUMNS
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(session_from_row).collect()
    }
}
