//! Native API client with session management.
//!
//! `ApiClient` wraps the HTTP surface (signup, login, `/me`) and owns the
//! client-side session: the token and cached user from the last successful
//! signup or login. Guarded calls attach the token as a bearer credential;
//! a `401` from any of them is authoritative and drops the session back to
//! [`SessionState::LoggedOut`], handing the caller
//! [`ClientError::Unauthenticated`] as the signal to show a login view.
//! Network failures leave the session untouched.

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::api::handlers::auth::{AuthResponse, LoginRequest, MeResponse, SignupRequest};

pub use crate::api::handlers::auth::UserView;
pub use session::SessionState;

mod session;

/// Default request timeout applied to all calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unable to reach the server: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Failed to decode response: {0}")]
    Parse(String),
}

/// HTTP client plus single-owner session state.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: session::SessionStore,
}

impl ApiClient {
    /// Build a client for the given API base URL.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: session::SessionStore::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Cached user from the last successful signup or login.
    #[must_use]
    pub fn current_user(&self) -> Option<UserView> {
        self.session.current_user()
    }

    /// Create an account and start a session for it.
    ///
    /// # Errors
    /// Returns `ClientError::Http` for validation and conflict responses,
    /// `Network`/`Parse` for transport problems.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserView, ClientError> {
        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/signup")).json(&request).send().await?;
        let auth: AuthResponse = handle_json_response(response).await?;

        self.session.establish(auth.token, auth.user.clone());
        Ok(auth.user)
    }

    /// Authenticate and start a session.
    ///
    /// A failed login is an `Http` error, not a forced logout: there is no
    /// session to wipe, and the server's message is already uniform.
    ///
    /// # Errors
    /// Returns `ClientError::Http` when the credentials are rejected,
    /// `Network`/`Parse` for transport problems.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserView, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/login")).json(&request).send().await?;
        let auth: AuthResponse = handle_json_response(response).await?;

        self.session.establish(auth.token, auth.user.clone());
        Ok(auth.user)
    }

    /// Drop the session. Tokens are stateless, so discarding the client copy
    /// is the only revocation there is.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// Fetch the authenticated user from the server.
    ///
    /// # Errors
    /// Returns `ClientError::Unauthenticated` when not logged in or when the
    /// server rejects the token; the session is wiped in the latter case.
    pub async fn me(&self) -> Result<UserView, ClientError> {
        let Some((epoch, token)) = self.session.snapshot() else {
            return Err(ClientError::Unauthenticated);
        };

        let response = self
            .http
            .get(self.url("/me"))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Authoritative: whatever call observes a 401 first wins, unless
            // the session already changed underneath it.
            self.session.invalidate(epoch);
            return Err(ClientError::Unauthenticated);
        }

        let me: MeResponse = handle_json_response(response).await?;
        Ok(me.user)
    }
}

/// Parse JSON responses and surface HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Http {
            status,
            message: sanitize_body(body),
        })
    }
}

/// Sanitize HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_body, ApiClient, SessionState};

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body("  oops  \n".to_string()), "oops");
        assert_eq!(sanitize_body(String::new()), "Request failed.");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(long).len(), super::MAX_ERROR_CHARS);
    }

    #[test]
    fn new_client_is_logged_out() {
        let client = ApiClient::new("http://localhost:8080/").expect("client");
        assert_eq!(client.state(), SessionState::LoggedOut);
        assert!(client.current_user().is_none());
    }

    #[tokio::test]
    async fn me_without_session_short_circuits() {
        // No request is made; the port does not even need to exist.
        let client = ApiClient::new("http://localhost:1").expect("client");
        let err = client.me().await.expect_err("not signed in");
        assert!(matches!(err, super::ClientError::Unauthenticated));
    }
}
