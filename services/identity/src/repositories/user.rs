//! User repository for database operations

use common::error::{DatabaseError, DatabaseResult, map_unique_violation};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::{
    models::{Role, User},
    store::UserStore,
};

const USER_COLUMNS: &str = "id, fullname, email, password_hash, role, is_verified, \
                            reset_token, reset_token_expiry, created_at, updated_at";

/// User repository backed by the `users` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> DatabaseResult<User> {
    let role: String = row.try_get("role")?;
    let role = role.parse::<Role>().map_err(|reason| DatabaseError::Decode {
        collection: "users",
        reason,
    })?;

    Ok(User {
        id: row.try_get("id")?,
        fullname: row.try_get("fullname")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role,
        is_verified: row.try_get("is_verified")?,
        reset_token: row.try_get("reset_token")?,
        reset_token_expiry: row.try_get("reset_token_expiry")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl UserStore for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert(&self, user: &User) -> DatabaseResult<()> {
        info!("Creating user: {}", user.email);

        sqlx::query(
            r#"
            INSERT INTO users (id, fullname, email, password_hash, role, is_verified,
                               reset_token, reset_token_expiry, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .bind(&user.reset_token)
        .bind(user.reset_token_expiry)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation("users"))?;

        Ok(())
    }

    async fn save(&self, user: &User) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET fullname = $2, email = $3, password_hash = $4, role = $5, is_verified = $6,
                reset_token = $7, reset_token_expiry = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .bind(&user.reset_token)
        .bind(user.reset_token_expiry)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_role(&self, role: Role) -> DatabaseResult<Vec<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE role = $1 ORDER BY created_at, id",
            USER_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(user_from_row).collect()
    }
}
