//! Sport repository for database operations

use common::error::{DatabaseError, DatabaseResult, map_unique_violation};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::{
    models::{Sport, SportStatus},
    store::SportStore,
};

const SPORT_COLUMNS: &str = "id, name, status, created_at, updated_at";

/// Sport repository backed by the `sports` table
#[derive(Clone)]
pub struct PgSportRepository {
    pool: PgPool,
}

impl PgSportRepository {
    /// Create a new sport repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, clause: &str, value: &str) -> DatabaseResult<Option<Sport>> {
        let query = format!(
            "SELECT {} FROM sports WHERE {} ORDER BY created_at, id LIMIT 1",
            SPORT_COLUMNS, clause
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(sport_from_row).transpose()
    }
}

fn sport_from_row(row: &PgRow) -> DatabaseResult<Sport> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<SportStatus>()
        .map_err(|reason| DatabaseError::Decode {
            collection: "sports",
            reason,
        })?;

    Ok(Sport {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl SportStore for PgSportRepository {
    async fn list(&self) -> DatabaseResult<Vec<Sport>> {
        let query = format!("SELECT {} FROM sports ORDER BY created_at, id", SPORT_COLUMNS);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(sport_from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Sport>> {
        let query = format!("SELECT {} FROM sports WHERE id = $1", SPORT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(sport_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Sport>> {
        self.fetch_one_where("name = $1", name).await
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> DatabaseResult<Option<Sport>> {
        self.fetch_one_where("lower(name) = lower($1)", name).await
    }

    async fn insert(&self, sport: &Sport) -> DatabaseResult<()> {
        info!(sport_id = %sport.id, name = %sport.name, "Inserting sport");

        sqlx::query(
            r#"
            INSERT INTO sports (id, name, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(sport.id)
        .bind(&sport.name)
        .bind(sport.status.as_str())
        .bind(sport.created_at)
        .bind(sport.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation("sports"))?;

        Ok(())
    }

    async fn save(&self, sport: &Sport) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sports
            SET name = $2, status = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(sport.id)
        .bind(&sport.name)
        .bind(sport.status.as_str())
        .bind(sport.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation("sports"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM sports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
