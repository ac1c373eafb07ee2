//! Session state primitives shared across the UI.
//!
//! # Design
//! - Store only the identity; "authenticated" is derived from it so the two can never disagree.
//! - Keep fields private so every write goes through a named transition.
//! - The expiry notice is one-shot: it is set by an expiry event and removed by the first consumer.

use crate::models::{Role, UserIdentity};

/// Whether the session is still being restored from a persisted token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// A persisted token is being validated; routing decisions must wait.
    Restoring,
    /// The session reflects the final answer for this boot.
    #[default]
    Ready,
}

/// Process-wide record of who is signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<UserIdentity>,
    auth_expired_message: Option<String>,
    phase: SessionPhase,
}

impl SessionState {
    /// Identity of the signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Role of the signed-in user, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// Pending expiry notice, if one has not been consumed yet.
    #[must_use]
    pub fn auth_expired_message(&self) -> Option<&str> {
        self.auth_expired_message.as_deref()
    }

    /// Current restore phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Replace the identity and drop any pending expiry notice.
    ///
    /// Returns `false` when the state was already identical.
    pub fn login(&mut self, identity: UserIdentity) -> bool {
        let changed =
            self.user.as_ref() != Some(&identity) || self.auth_expired_message.is_some();
        self.user = Some(identity);
        self.auth_expired_message = None;
        self.phase = SessionPhase::Ready;
        changed
    }

    /// Clear the identity. The expiry notice is left untouched.
    pub fn logout(&mut self) -> bool {
        self.phase = SessionPhase::Ready;
        self.user.take().is_some()
    }

    /// Sign out because the server rejected the session, keeping a notice for the next view.
    pub fn mark_session_expired(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.user = None;
        self.phase = SessionPhase::Ready;
        self.auth_expired_message = if message.trim().is_empty() {
            None
        } else {
            Some(message)
        };
    }

    /// Drop the pending expiry notice. No-op when none is pending.
    pub fn clear_auth_expired_message(&mut self) -> bool {
        self.auth_expired_message.take().is_some()
    }

    /// Remove and return the pending expiry notice.
    pub fn take_auth_expired_message(&mut self) -> Option<String> {
        self.auth_expired_message.take()
    }

    /// Enter the restoring phase while a persisted token is validated.
    pub fn begin_restore(&mut self) {
        if self.user.is_none() {
            self.phase = SessionPhase::Restoring;
        }
    }

    /// Leave the restoring phase with the validated identity, if any.
    ///
    /// A login that landed while the restore was in flight wins over the restore result.
    pub fn finish_restore(&mut self, identity: Option<UserIdentity>) {
        if self.phase != SessionPhase::Restoring {
            return;
        }
        self.phase = SessionPhase::Ready;
        if let Some(identity) = identity {
            self.user = Some(identity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionPhase, SessionState};
    use crate::models::{Role, UserIdentity};

    fn identity(name: &str, role: Role) -> UserIdentity {
        UserIdentity {
            username: name.to_string(),
            role,
        }
    }

    #[test]
    fn starts_signed_out_without_notice() {
        let state = SessionState::default();
        assert!(state.user().is_none());
        assert!(!state.is_authenticated());
        assert_eq!(state.auth_expired_message(), None);
        assert_eq!(state.phase(), SessionPhase::Ready);
    }

    #[test]
    fn login_sets_identity_and_clears_notice() {
        let mut state = SessionState::default();
        state.mark_session_expired("連線逾時，請重新登入");
        assert!(state.login(identity("TestUser", Role::User)));
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::User));
        assert_eq!(state.auth_expired_message(), None);
    }

    #[test]
    fn login_twice_with_same_identity_is_idempotent() {
        let mut state = SessionState::default();
        assert!(state.login(identity("Admin", Role::Admin)));
        let snapshot = state.clone();
        assert!(!state.login(identity("Admin", Role::Admin)));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn login_replaces_identity_wholesale() {
        let mut state = SessionState::default();
        state.login(identity("Admin", Role::Admin));
        state.login(identity("User", Role::User));
        assert_eq!(state.user(), Some(&identity("User", Role::User)));
    }

    #[test]
    fn logout_clears_user_only() {
        let mut state = SessionState::default();
        state.login(identity("User", Role::User));
        assert!(state.logout());
        assert!(!state.is_authenticated());
        assert!(!state.logout());
    }

    #[test]
    fn expiry_signs_out_and_exposes_notice_once() {
        let mut state = SessionState::default();
        state.login(identity("User", Role::User));
        state.mark_session_expired("連線逾時，請重新登入");
        assert!(!state.is_authenticated());
        assert_eq!(state.auth_expired_message(), Some("連線逾時，請重新登入"));

        assert!(state.clear_auth_expired_message());
        assert_eq!(state.auth_expired_message(), None);
        assert!(!state.clear_auth_expired_message());
        assert_eq!(state.auth_expired_message(), None);
    }

    #[test]
    fn take_consumes_notice() {
        let mut state = SessionState::default();
        state.mark_session_expired("expired");
        assert_eq!(state.take_auth_expired_message().as_deref(), Some("expired"));
        assert_eq!(state.take_auth_expired_message(), None);
    }

    #[test]
    fn blank_expiry_message_is_not_a_notice() {
        let mut state = SessionState::default();
        state.login(identity("User", Role::User));
        state.mark_session_expired("   ");
        assert!(!state.is_authenticated());
        assert_eq!(state.auth_expired_message(), None);
    }

    #[test]
    fn restore_adopts_validated_identity() {
        let mut state = SessionState::default();
        state.begin_restore();
        assert_eq!(state.phase(), SessionPhase::Restoring);
        state.finish_restore(Some(identity("User", Role::User)));
        assert_eq!(state.phase(), SessionPhase::Ready);
        assert!(state.is_authenticated());
    }

    #[test]
    fn restore_without_identity_stays_signed_out() {
        let mut state = SessionState::default();
        state.begin_restore();
        state.finish_restore(None);
        assert_eq!(state.phase(), SessionPhase::Ready);
        assert!(!state.is_authenticated());
        assert_eq!(state.auth_expired_message(), None);
    }

    #[test]
    fn late_restore_does_not_override_fresh_login() {
        let mut state = SessionState::default();
        state.begin_restore();
        state.login(identity("Fresh", Role::Admin));
        state.finish_restore(Some(identity("Stale", Role::User)));
        assert_eq!(state.user(), Some(&identity("Fresh", Role::Admin)));
    }
}
