//! PostgreSQL user repository
//!
//! Lists live in `jsonb` columns. Add and remove are each one `UPDATE`, so the
//! row lock taken by PostgreSQL serialises concurrent mutations of the same
//! user.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use super::UserRepository;
use crate::models::{ListKind, MovieRef, NewUser, User};

const USER_COLUMNS: &str =
    "id, username, password_hash, favourites, mustwatch, created_at, updated_at";

/// User repository
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

fn user_from_row(row: &PgRow) -> Result<User> {
    let favourites: Json<Vec<MovieRef>> = row.try_get("favourites")?;
    let mustwatch: Json<Vec<MovieRef>> = row.try_get("mustwatch")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        favourites: favourites.0,
        mustwatch: mustwatch.0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn list_from_row(row: Option<PgRow>) -> Result<Option<Vec<MovieRef>>> {
    match row {
        Some(row) => {
            let list: Json<Vec<MovieRef>> = row.try_get("list")?;
            Ok(Some(list.0))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_from_row).collect()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        info!("Finding user by username: {}", username);

        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create(&self, new_user: NewUser) -> Result<Option<User>> {
        info!("Creating new user: {}", new_user.username);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn update_password(&self, username: &str, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = now()
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie: &MovieRef,
    ) -> Result<Option<Vec<MovieRef>>> {
        let column = kind.column();
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET {column} = CASE
                    WHEN EXISTS (
                        SELECT 1 FROM jsonb_array_elements({column}) AS elem
                        WHERE elem -> 'id' = $2::jsonb
                    ) THEN {column}
                    ELSE {column} || jsonb_build_array($3::jsonb)
                END,
                updated_at = now()
            WHERE username = $1
            RETURNING {column} AS list
            "#
        ))
        .bind(username)
        .bind(Json(&movie.id))
        .bind(Json(movie))
        .fetch_optional(&self.pool)
        .await?;

        list_from_row(row)
    }

    async fn remove_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie_id: &Value,
    ) -> Result<Option<Vec<MovieRef>>> {
        let column = kind.column();
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET {column} = COALESCE(
                    (SELECT jsonb_agg(elem ORDER BY pos)
                     FROM jsonb_array_elements({column}) WITH ORDINALITY AS t(elem, pos)
                     WHERE elem -> 'id' IS DISTINCT FROM $2::jsonb),
                    '[]'::jsonb
                ),
                updated_at = now()
            WHERE username = $1
            RETURNING {column} AS list
            "#
        ))
        .bind(username)
        .bind(Json(movie_id))
        .fetch_optional(&self.pool)
        .await?;

        list_from_row(row)
    }

    async fn list_movies(&self, username: &str, kind: ListKind) -> Result<Option<Vec<MovieRef>>> {
        let row = sqlx::query(&format!(
            "SELECT {} AS list FROM users WHERE username = $1",
            kind.column()
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        list_from_row(row)
    }
}
