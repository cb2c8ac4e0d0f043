//! Authenticated principal extraction.
//!
//! Flow Overview: pull the bearer token from the `Authorization` header,
//! verify it against the process-wide secret, and resolve the subject to a
//! stored user. A guarded handler body runs only after all three steps
//! succeed; any failure short-circuits with the same unauthenticated
//! outcome, whether the token was missing, invalid, expired, or its user is
//! gone.

use axum::http::HeaderMap;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    error::AuthError,
    storage::{lookup_by_id, UserRecord},
    token::SessionTokens,
    types::UserView,
    utils::extract_bearer_token,
};

/// Authenticated user context derived from a verified bearer token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub user: UserView,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// Resolve a bearer token into a principal, or fail with `Unauthenticated`.
///
/// The subject's record is re-checked on every call; a structurally valid
/// token whose user has been deleted is rejected the same way as a bad
/// token.
///
/// # Errors
/// Returns `AuthError::Unauthenticated` for any missing or invalid
/// credential, and `AuthError::Internal` if the store itself fails.
pub async fn require_auth(
    headers: &HeaderMap,
    pool: &PgPool,
    tokens: &SessionTokens,
) -> Result<Principal, AuthError> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(AuthError::Unauthenticated);
    };

    let subject = tokens
        .verify(&token)
        .map_err(|_| AuthError::Unauthenticated)?;

    match lookup_by_id(pool, subject).await? {
        Some(record) => Ok(Principal {
            user_id: record.id,
            user: record.into(),
        }),
        None => Err(AuthError::Unauthenticated),
    }
}
