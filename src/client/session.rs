//! Client-side session state.
//!
//! One store owns the cached token and user; nothing else mutates them. The
//! epoch counter makes transitions safe under overlapping in-flight
//! requests: every guarded call snapshots the epoch alongside the token,
//! and a rejection only wipes the session if the epoch still matches. A
//! logout or a newer login bumps the epoch, so a late-arriving response for
//! an earlier call carrying a stale token can never clobber newer state.

use secrecy::SecretString;
use std::sync::{Mutex, PoisonError};

use super::UserView;

/// Observable session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

struct ActiveSession {
    token: SecretString,
    user: UserView,
}

struct Slot {
    epoch: u64,
    active: Option<ActiveSession>,
}

pub(super) struct SessionStore {
    inner: Mutex<Slot>,
}

impl SessionStore {
    pub(super) fn new() -> Self {
        Self {
            inner: Mutex::new(Slot {
                epoch: 0,
                active: None,
            }),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cache a fresh session after a successful signup or login.
    pub(super) fn establish(&self, token: String, user: UserView) {
        let mut slot = self.slot();
        slot.epoch += 1;
        slot.active = Some(ActiveSession {
            token: SecretString::from(token),
            user,
        });
    }

    /// Wipe the session unconditionally (logout).
    pub(super) fn clear(&self) {
        let mut slot = self.slot();
        slot.epoch += 1;
        slot.active = None;
    }

    /// Wipe the session in reaction to an unauthenticated outcome, but only
    /// if `epoch` still matches the session the rejected call was made with.
    /// Returns whether anything was cleared.
    pub(super) fn invalidate(&self, epoch: u64) -> bool {
        let mut slot = self.slot();
        if slot.epoch == epoch && slot.active.is_some() {
            slot.epoch += 1;
            slot.active = None;
            true
        } else {
            false
        }
    }

    /// Epoch and token for an outgoing guarded call, if logged in.
    pub(super) fn snapshot(&self) -> Option<(u64, SecretString)> {
        let slot = self.slot();
        slot.active
            .as_ref()
            .map(|active| (slot.epoch, active.token.clone()))
    }

    pub(super) fn state(&self) -> SessionState {
        if self.slot().active.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub(super) fn current_user(&self) -> Option<UserView> {
        self.slot().active.as_ref().map(|active| active.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionState, SessionStore};
    use crate::client::UserView;
    use secrecy::ExposeSecret;

    fn user(email: &str) -> UserView {
        UserView {
            id: "00000000-0000-0000-0000-000000000001".to_string(),
            name: "Ann".to_string(),
            email: email.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn starts_logged_out() {
        let store = SessionStore::new();
        assert_eq!(store.state(), SessionState::LoggedOut);
        assert!(store.snapshot().is_none());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn establish_then_clear_round_trip() {
        let store = SessionStore::new();
        store.establish("token-1".to_string(), user("ann@x.com"));
        assert_eq!(store.state(), SessionState::LoggedIn);
        assert_eq!(
            store.current_user().map(|user| user.email),
            Some("ann@x.com".to_string())
        );

        store.clear();
        assert_eq!(store.state(), SessionState::LoggedOut);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn invalidate_with_matching_epoch_logs_out() {
        let store = SessionStore::new();
        store.establish("token-1".to_string(), user("ann@x.com"));
        let (epoch, token) = store.snapshot().expect("logged in");
        assert_eq!(token.expose_secret(), "token-1");

        assert!(store.invalidate(epoch));
        assert_eq!(store.state(), SessionState::LoggedOut);
    }

    #[test]
    fn stale_rejection_does_not_clobber_logout() {
        let store = SessionStore::new();
        store.establish("token-1".to_string(), user("ann@x.com"));
        let (epoch, _token) = store.snapshot().expect("logged in");

        // Logout lands before the in-flight call's rejection arrives.
        store.clear();
        assert!(!store.invalidate(epoch));
        assert_eq!(store.state(), SessionState::LoggedOut);
    }

    #[test]
    fn stale_rejection_does_not_clobber_newer_login() {
        let store = SessionStore::new();
        store.establish("token-1".to_string(), user("ann@x.com"));
        let (old_epoch, _token) = store.snapshot().expect("logged in");

        // A newer login replaces the session while the old call is still in
        // flight; its eventual 401 must not log the new session out.
        store.establish("token-2".to_string(), user("bea@x.com"));
        assert!(!store.invalidate(old_epoch));
        assert_eq!(store.state(), SessionState::LoggedIn);
        assert_eq!(
            store.current_user().map(|user| user.email),
            Some("bea@x.com".to_string())
        );

        let (_, token) = store.snapshot().expect("still logged in");
        assert_eq!(token.expose_secret(), "token-2");
    }

    #[test]
    fn invalidate_is_idempotent() {
        let store = SessionStore::new();
        store.establish("token-1".to_string(), user("ann@x.com"));
        let (epoch, _token) = store.snapshot().expect("logged in");

        assert!(store.invalidate(epoch));
        assert!(!store.invalidate(epoch));
        assert_eq!(store.state(), SessionState::LoggedOut);
    }
}
