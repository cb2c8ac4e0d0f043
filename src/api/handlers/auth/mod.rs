//! Auth handlers and supporting modules.
//!
//! Signup and login issue signed, self-contained session tokens; the
//! principal module gates every protected route on a verified token whose
//! subject still exists.
//!
//! ## Rejection policy
//!
//! Login failures use one message for unknown emails and wrong passwords,
//! and protected routes use one `401` for every token problem. Keep it that
//! way: the error surface must not leak which sub-case occurred.

pub(crate) mod error;
pub(crate) mod login;
pub(crate) mod password;
pub(crate) mod principal;
pub(crate) mod signup;
mod storage;
pub(crate) mod token;
pub(crate) mod types;
mod utils;

pub use error::AuthError;
pub use principal::{require_auth, Principal};
pub use token::{SessionTokens, TokenRejected, SESSION_TTL_SECONDS};
pub use types::{AuthResponse, LoginRequest, MeResponse, SignupRequest, UserView};
