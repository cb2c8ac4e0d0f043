//! Authenticated identity lookup.

use axum::{extract::Extension, http::HeaderMap, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use super::auth::{require_auth, AuthError, MeResponse, SessionTokens};

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Return the authenticated user.", body = MeResponse),
        (status = 401, description = "Missing or invalid bearer token."),
    ),
    tag = "me"
)]
#[instrument(skip_all)]
pub async fn me(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    tokens: Extension<Arc<SessionTokens>>,
) -> Result<impl IntoResponse, AuthError> {
    // The guard fully resolves the user before this body runs; a token for a
    // deleted account fails here, not later.
    let principal = require_auth(&headers, &pool, &tokens).await?;

    Ok(Json(MeResponse {
        user: principal.user,
    }))
}
