//! Error taxonomy for the auth surface.
//!
//! Everything a handler or guard can fail with is translated into one of
//! these kinds before it reaches the HTTP boundary. `InvalidCredentials` and
//! `Unauthenticated` each carry a single fixed message: the response must not
//! reveal whether an email exists, or whether a token was missing, expired,
//! or tampered with.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already registered")]
    Conflict,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthenticated,
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl AuthError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        if let Self::Internal(ref source) = self {
            // Log the cause server-side; the response stays opaque.
            error!("Internal error: {source:?}");
        }

        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::AuthError;
    use anyhow::anyhow;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AuthError::Validation("Name is required".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Conflict.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal(anyhow!("pool exhausted"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn credential_failures_share_one_message() {
        // Unknown email and wrong password both surface this exact text.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn internal_detail_stays_server_side() {
        let err = AuthError::Internal(anyhow!("connection refused to 10.0.0.7"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
