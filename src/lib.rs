//! # AutoIMS (Vehicle Service Center Management API)
//!
//! `autoims` is the backend for a vehicle service center: customer and
//! vehicle records, service requests and jobs, parts inventory, and billing,
//! behind a token-authenticated REST API.
//!
//! ## Authentication
//!
//! Accounts are email + password. Passwords are stored as salted `argon2`
//! digests, never in the clear. A successful signup or login returns a
//! signed, self-contained session token (HMAC-SHA256, 12-hour lifetime)
//! that clients present as `Authorization: Bearer <token>` on protected
//! routes. Tokens are stateless: nothing is stored server-side, and
//! discarding the token client-side is the only revocation.
//!
//! ## Rejection policy
//!
//! Login failures return one uniform message whether the email is unknown or
//! the password is wrong, and protected routes return one uniform `401` for
//! missing, malformed, expired, and tampered tokens alike. This is
//! deliberate: the error surface must not help enumerate accounts or probe
//! token state.

pub mod api;
pub mod cli;
pub mod client;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
