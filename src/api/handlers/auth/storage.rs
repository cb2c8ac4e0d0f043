//! Database helpers for user records.
//!
//! Email values are normalized before they get here; the unique constraint
//! on `users.email` is the arbiter when two signups race on the same
//! address.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::utils::is_unique_violation;

/// A stored user row. Never serialized; the password hash stays inside the
/// auth module.
pub(crate) struct UserRecord {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) created_at: String,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub(crate) enum SignupOutcome {
    Created(Box<UserRecord>),
    Conflict,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

const USER_COLUMNS: &str = r#"
    id,
    name,
    email,
    password_hash,
    to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
"#;

fn record_from_row(row: &sqlx::postgres::PgRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

/// Insert a new user, letting the unique constraint arbitrate duplicates.
pub(crate) async fn insert_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<SignupOutcome> {
    let query = format!(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(SignupOutcome::Created(Box::new(record_from_row(&row)))),
        Err(err) if is_unique_violation(&err) => Ok(SignupOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

/// Look up a user by normalized email (used by login and the signup
/// pre-check).
pub(crate) async fn lookup_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by email")?;

    Ok(row.map(|row| record_from_row(&row)))
}

/// Resolve a token subject to its stored record. Returns `None` when the
/// record no longer exists, which the guard treats like a bad token.
pub(crate) async fn lookup_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 1");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by id")?;

    Ok(row.map(|row| record_from_row(&row)))
}
