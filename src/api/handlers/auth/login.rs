//! Password login.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use super::{
    error::AuthError,
    password,
    storage::lookup_by_email,
    token::SessionTokens,
    types::{AuthResponse, LoginRequest},
    utils::normalize_email,
};

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    pool: Extension<PgPool>,
    tokens: Extension<Arc<SessionTokens>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, AuthError> {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return Err(AuthError::Validation("Missing payload".to_string())),
    };

    let email = normalize_email(&request.email);
    if email.is_empty() {
        return Err(AuthError::Validation("Email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()));
    }

    // Unknown email and wrong password must be indistinguishable from here
    // on: both fall through to the same InvalidCredentials.
    let Some(record) = lookup_by_email(&pool, &email).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    let password = request.password;
    let digest = record.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || password::verify(&password, &digest))
        .await
        .map_err(|err| AuthError::Internal(err.into()))?;
    if !verified {
        return Err(AuthError::InvalidCredentials);
    }

    let token = tokens
        .issue(record.id)
        .map_err(|err| AuthError::Internal(err.into()))?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            token,
            user: record.into(),
        }),
    ))
}
