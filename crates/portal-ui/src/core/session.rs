//! Process-wide authentication session handle.
//!
//! # Design
//! - One yewdux store per app context owns the session; this handle is the only writer.
//! - Updates are synchronous reducers, so any reader scheduled afterwards sees the full new state.
//! - Observers subscribe through the store and are notified on every change.

use std::rc::Rc;

use log::{debug, info, warn};
use yewdux::Context;
use yewdux::dispatch::Dispatch;

use crate::core::auth::SessionPhase;
use crate::core::store::AppStore;
use crate::models::UserIdentity;

/// Cloneable handle to the shared session.
#[derive(Clone)]
pub struct AuthSession {
    dispatch: Dispatch<AppStore>,
}

impl AuthSession {
    /// Attach to the store held by `cx`. Handles built from the same context share one session.
    #[must_use]
    pub fn new(cx: &Context) -> Self {
        Self {
            dispatch: Dispatch::new(cx),
        }
    }

    /// Session for a fresh app boot.
    ///
    /// With a persisted token the session starts out restoring, so routing waits for the
    /// token check instead of redirecting on the first render.
    #[must_use]
    pub fn boot(cx: &Context, has_persisted_token: bool) -> Self {
        let session = Self::new(cx);
        if has_persisted_token {
            session.begin_restore();
        }
        session
    }

    /// Store context backing this handle.
    #[must_use]
    pub fn context(&self) -> &Context {
        self.dispatch.context()
    }

    /// Current snapshot of the whole store.
    #[must_use]
    pub fn snapshot(&self) -> Rc<AppStore> {
        self.dispatch.get()
    }

    /// Identity of the signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<UserIdentity> {
        self.snapshot().session.user().cloned()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().session.is_authenticated()
    }

    /// Pending expiry notice, if any.
    #[must_use]
    pub fn auth_expired_message(&self) -> Option<String> {
        self.snapshot()
            .session
            .auth_expired_message()
            .map(ToString::to_string)
    }

    /// Current restore phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.snapshot().session.phase()
    }

    /// Record a successful sign-in.
    pub fn login(&self, identity: UserIdentity) {
        let current = self.snapshot();
        if current.session.user() == Some(&identity)
            && current.session.auth_expired_message().is_none()
            && current.session.phase() == SessionPhase::Ready
        {
            debug!("session login ignored: identity unchanged");
            return;
        }
        info!(
            "session signed in as {} ({})",
            identity.username,
            identity.role.as_str()
        );
        self.dispatch.reduce_mut(move |store| {
            store.session.login(identity);
        });
    }

    /// Sign out. Navigation is left to the caller.
    pub fn logout(&self) {
        if !self.is_authenticated() && self.phase() == SessionPhase::Ready {
            debug!("session logout ignored: already signed out");
            return;
        }
        info!("session signed out");
        self.dispatch.reduce_mut(|store| {
            store.session.logout();
        });
    }

    /// Sign out because the server rejected the session and leave a notice for the next view.
    pub fn mark_session_expired(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("session expired: {message}");
        self.dispatch.reduce_mut(move |store| {
            store.session.mark_session_expired(message);
        });
    }

    /// Drop the pending expiry notice. Safe to call when none is pending.
    pub fn clear_auth_expired_message(&self) {
        if self.snapshot().session.auth_expired_message().is_none() {
            return;
        }
        debug!("session expiry notice cleared");
        self.dispatch.reduce_mut(|store| {
            store.session.clear_auth_expired_message();
        });
    }

    /// Read and clear the pending expiry notice in one step.
    #[must_use]
    pub fn take_auth_expired_message(&self) -> Option<String> {
        let message = self.auth_expired_message()?;
        self.clear_auth_expired_message();
        Some(message)
    }

    /// Hold routing decisions while a persisted token is validated.
    pub fn begin_restore(&self) {
        debug!("session restore started");
        self.dispatch.reduce_mut(|store| {
            store.session.begin_restore();
        });
    }

    /// Finish a restore with the validated identity, if any.
    pub fn finish_restore(&self, identity: Option<UserIdentity>) {
        match &identity {
            Some(user) => info!("session restored for {}", user.username),
            None => debug!("no session to restore"),
        }
        self.dispatch.reduce_mut(move |store| {
            store.session.finish_restore(identity);
        });
    }

    /// Observe every store change until the returned subscription is dropped.
    ///
    /// The current snapshot is delivered immediately.
    #[must_use]
    pub fn subscribe<F>(&self, on_change: F) -> SessionSubscription
    where
        F: Fn(Rc<AppStore>) + 'static,
    {
        SessionSubscription {
            _dispatch: Dispatch::new(self.context()).subscribe(on_change),
        }
    }
}

/// Live store subscription; dropping it unsubscribes.
pub struct SessionSubscription {
    _dispatch: Dispatch<AppStore>,
}

#[cfg(test)]
mod tests {
    use super::AuthSession;
    use crate::core::auth::SessionPhase;
    use crate::core::guard::{GuardDecision, Navigation, Page, evaluate_page};
    use crate::models::{Role, UserIdentity};
    use std::cell::RefCell;
    use std::rc::Rc;
    use yewdux::Context;

    fn fresh() -> AuthSession {
        AuthSession::new(&Context::new())
    }

    fn user(role: Role) -> UserIdentity {
        UserIdentity {
            username: "TestUser".to_string(),
            role,
        }
    }

    #[test]
    fn handles_share_one_session() {
        let cx = Context::new();
        let first = AuthSession::new(&cx);
        let second = AuthSession::new(&cx);
        first.login(user(Role::User));
        assert_eq!(second.user(), Some(user(Role::User)));
        assert!(second.is_authenticated());
        second.logout();
        assert!(!first.is_authenticated());
        assert_eq!(first.user(), None);
    }

    #[test]
    fn separate_contexts_do_not_share() {
        let first = fresh();
        let second = fresh();
        first.login(user(Role::User));
        assert!(!second.is_authenticated());
    }

    #[test]
    fn expiry_then_clear_is_idempotent() {
        let session = fresh();
        session.login(user(Role::Admin));
        session.mark_session_expired("連線逾時，請重新登入");
        assert!(!session.is_authenticated());
        assert_eq!(
            session.auth_expired_message().as_deref(),
            Some("連線逾時，請重新登入")
        );
        session.clear_auth_expired_message();
        assert_eq!(session.auth_expired_message(), None);
        session.clear_auth_expired_message();
        assert_eq!(session.auth_expired_message(), None);
    }

    #[test]
    fn take_reads_notice_once() {
        let session = fresh();
        session.mark_session_expired("expired");
        assert_eq!(session.take_auth_expired_message().as_deref(), Some("expired"));
        assert_eq!(session.take_auth_expired_message(), None);
    }

    #[test]
    fn subscribers_see_consistent_snapshots() {
        let session = fresh();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _subscription = {
            let seen = Rc::clone(&seen);
            session.subscribe(move |store| {
                seen.borrow_mut().push((
                    store.session.is_authenticated(),
                    store.session.user().map(|user| user.role),
                ));
            })
        };
        session.login(user(Role::Admin));
        session.mark_session_expired("expired");

        let seen = seen.borrow();
        assert!(seen.contains(&(true, Some(Role::Admin))));
        assert_eq!(seen.last(), Some(&(false, None)));
        assert!(
            seen.iter()
                .all(|(authenticated, role)| *authenticated == role.is_some())
        );
    }

    #[test]
    fn repeated_login_does_not_notify() {
        let session = fresh();
        session.login(user(Role::User));
        let count = Rc::new(RefCell::new(0_u32));
        let _subscription = {
            let count = Rc::clone(&count);
            session.subscribe(move |_| *count.borrow_mut() += 1)
        };
        let before = *count.borrow();
        session.login(user(Role::User));
        assert_eq!(*count.borrow(), before);
    }

    #[test]
    fn restore_phase_round_trip() {
        let session = fresh();
        session.begin_restore();
        assert_eq!(session.phase(), SessionPhase::Restoring);
        session.finish_restore(Some(user(Role::User)));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.is_authenticated());
    }

    #[test]
    fn boot_with_token_holds_pages_until_restore_finishes() {
        let session = AuthSession::boot(&Context::new(), true);
        for page in [Page::Login, Page::Dashboard, Page::Admin] {
            assert_eq!(
                evaluate_page(page, &session.snapshot().session),
                GuardDecision::Pending
            );
        }
        session.finish_restore(Some(user(Role::User)));
        let store = session.snapshot();
        assert_eq!(evaluate_page(Page::Dashboard, &store.session), GuardDecision::Render);
        assert_eq!(
            evaluate_page(Page::Login, &store.session),
            GuardDecision::Redirect(Navigation::replace(Page::Dashboard))
        );
    }

    #[test]
    fn boot_with_rejected_token_falls_back_to_login() {
        let session = AuthSession::boot(&Context::new(), true);
        session.finish_restore(None);
        assert_eq!(
            evaluate_page(Page::Dashboard, &session.snapshot().session),
            GuardDecision::Redirect(Navigation::replace(Page::Login))
        );
    }

    #[test]
    fn boot_without_token_is_ready_at_once() {
        let session = AuthSession::boot(&Context::new(), false);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(
            evaluate_page(Page::Admin, &session.snapshot().session),
            GuardDecision::Redirect(Navigation::replace(Page::Login))
        );
    }
}
