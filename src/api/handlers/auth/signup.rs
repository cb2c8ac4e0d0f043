//! Account creation.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use super::{
    error::AuthError,
    password,
    storage::{insert_user, lookup_by_email, SignupOutcome},
    token::SessionTokens,
    types::{AuthResponse, SignupRequest},
    utils::{normalize_email, valid_email},
};

const MIN_PASSWORD_CHARS: usize = 6;

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn signup(
    pool: Extension<PgPool>,
    tokens: Extension<Arc<SessionTokens>>,
    payload: Option<Json<SignupRequest>>,
) -> Result<impl IntoResponse, AuthError> {
    let request: SignupRequest = match payload {
        Some(Json(payload)) => payload,
        None => return Err(AuthError::Validation("Missing payload".to_string())),
    };

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(AuthError::Validation("Name is required".to_string()));
    }

    let email = normalize_email(&request.email);
    if email.is_empty() {
        return Err(AuthError::Validation("Email is required".to_string()));
    }
    if !valid_email(&email) {
        return Err(AuthError::Validation("Invalid email".to_string()));
    }

    if request.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }

    // Cheap pre-check for the common duplicate case; the unique constraint
    // still arbitrates concurrent signups on the same address.
    if lookup_by_email(&pool, &email).await?.is_some() {
        return Err(AuthError::Conflict);
    }

    // Hashing is deliberately expensive; keep it off the async workers.
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || password::hash(&password))
        .await
        .map_err(|err| AuthError::Internal(err.into()))?
        .map_err(|err| AuthError::Internal(err.into()))?;

    let record = match insert_user(&pool, &name, &email, &password_hash).await? {
        SignupOutcome::Created(record) => *record,
        SignupOutcome::Conflict => return Err(AuthError::Conflict),
    };

    let token = tokens
        .issue(record.id)
        .map_err(|err| AuthError::Internal(err.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: record.into(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::signup;
    use crate::api::handlers::auth::token::SessionTokens;
    use anyhow::Result;
    use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    fn session_tokens() -> Arc<SessionTokens> {
        Arc::new(SessionTokens::new(SecretString::from(
            "test-signing-secret".to_string(),
        )))
    }

    // The lazy pool never connects; these requests must be rejected before
    // any store access.
    fn lazy_pool() -> Result<sqlx::PgPool> {
        Ok(PgPoolOptions::new().connect_lazy("postgres://postgres@localhost/postgres")?)
    }

    #[tokio::test]
    async fn signup_missing_payload() -> Result<()> {
        let response = signup(Extension(lazy_pool()?), Extension(session_tokens()), None)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_blank_name() -> Result<()> {
        let payload = serde_json::from_value(serde_json::json!({
            "name": "   ",
            "email": "ann@x.com",
            "password": "secret123",
        }))?;
        let response = signup(
            Extension(lazy_pool()?),
            Extension(session_tokens()),
            Some(Json(payload)),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_invalid_email() -> Result<()> {
        let payload = serde_json::from_value(serde_json::json!({
            "name": "Ann",
            "email": "not-an-email",
            "password": "secret123",
        }))?;
        let response = signup(
            Extension(lazy_pool()?),
            Extension(session_tokens()),
            Some(Json(payload)),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_short_password() -> Result<()> {
        let payload = serde_json::from_value(serde_json::json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "five5",
        }))?;
        let response = signup(
            Extension(lazy_pool()?),
            Extension(session_tokens()),
            Some(Json(payload)),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }
}
