//! Route guard: decide whether a page may render for the current session.
//!
//! # Design
//! - Evaluated before every page render and again on every session change.
//! - Only the signed-in/signed-out boundary is gated here; role-specific content is the page's job.
//! - Redirects always replace the history entry so a guarded page is not reachable via back.

use crate::core::auth::{SessionPhase, SessionState};
use crate::core::config::{ADMIN_PATH, DASHBOARD_PATH, LOGIN_PATH};

/// Capability a page requires before it may render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Only for signed-out visitors (login); signed-in users are sent to the landing page.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Admin pages. Signed-in non-admins still render a reduced view.
    AdminOnly,
}

/// Pages known to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    /// Login form.
    Login,
    /// Default landing page after sign-in.
    Dashboard,
    /// Admin console.
    Admin,
}

/// Page shown after a successful sign-in.
pub const LANDING_PAGE: Page = Page::Dashboard;

impl Page {
    /// Path the router mounts the page at.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Dashboard => DASHBOARD_PATH,
            Self::Admin => ADMIN_PATH,
        }
    }

    /// Capability required to render the page.
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Login => Access::Public,
            Self::Dashboard => Access::Authenticated,
            Self::Admin => Access::AdminOnly,
        }
    }

    /// Resolve a path back to a page.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        [Self::Login, Self::Dashboard, Self::Admin]
            .into_iter()
            .find(|page| page.path() == trimmed)
    }
}

/// A navigation the caller should perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Destination page.
    pub to: Page,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl Navigation {
    /// Navigation that replaces the current history entry.
    #[must_use]
    pub const fn replace(to: Page) -> Self {
        Self { to, replace: true }
    }
}

/// Outcome of evaluating the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested page.
    Render,
    /// Leave the page; always a history replacement.
    Redirect(Navigation),
    /// Session restore is still running; render a neutral placeholder.
    Pending,
}

/// Decide what to do with a request for a page requiring `access`.
#[must_use]
pub const fn evaluate(access: Access, session: &SessionState) -> GuardDecision {
    if matches!(session.phase(), SessionPhase::Restoring) {
        return GuardDecision::Pending;
    }
    match (access, session.is_authenticated()) {
        (Access::Public, true) => GuardDecision::Redirect(Navigation::replace(LANDING_PAGE)),
        (Access::Authenticated | Access::AdminOnly, false) => {
            GuardDecision::Redirect(Navigation::replace(Page::Login))
        }
        (Access::Public, false) | (Access::Authenticated | Access::AdminOnly, true) => {
            GuardDecision::Render
        }
    }
}

/// Evaluate the guard for a known page.
#[must_use]
pub const fn evaluate_page(page: Page, session: &SessionState) -> GuardDecision {
    evaluate(page.access(), session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserIdentity};

    fn signed_in(role: Role) -> SessionState {
        let mut state = SessionState::default();
        state.login(UserIdentity {
            username: "User".to_string(),
            role,
        });
        state
    }

    #[test]
    fn signed_out_visitors_are_sent_to_login() {
        let state = SessionState::default();
        for page in [Page::Dashboard, Page::Admin] {
            assert_eq!(
                evaluate_page(page, &state),
                GuardDecision::Redirect(Navigation {
                    to: Page::Login,
                    replace: true
                })
            );
        }
        assert_eq!(evaluate_page(Page::Login, &state), GuardDecision::Render);
    }

    #[test]
    fn signed_in_users_skip_login() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(
                evaluate_page(Page::Login, &signed_in(role)),
                GuardDecision::Redirect(Navigation::replace(LANDING_PAGE))
            );
        }
    }

    #[test]
    fn non_admins_render_admin_page() {
        assert_eq!(
            evaluate_page(Page::Admin, &signed_in(Role::User)),
            GuardDecision::Render
        );
        assert_eq!(
            evaluate_page(Page::Admin, &signed_in(Role::Admin)),
            GuardDecision::Render
        );
        assert_eq!(
            evaluate_page(Page::Dashboard, &signed_in(Role::User)),
            GuardDecision::Render
        );
    }

    #[test]
    fn expiry_bounces_protected_pages() {
        let mut state = signed_in(Role::Admin);
        state.mark_session_expired("expired");
        assert_eq!(
            evaluate_page(Page::Dashboard, &state),
            GuardDecision::Redirect(Navigation::replace(Page::Login))
        );
        assert_eq!(evaluate_page(Page::Login, &state), GuardDecision::Render);
    }

    #[test]
    fn restore_holds_every_decision() {
        let mut state = SessionState::default();
        state.begin_restore();
        for page in [Page::Login, Page::Dashboard, Page::Admin] {
            assert_eq!(evaluate_page(page, &state), GuardDecision::Pending);
        }
    }

    #[test]
    fn paths_round_trip() {
        assert_eq!(Page::from_path("/login"), Some(Page::Login));
        assert_eq!(Page::from_path("/dashboard/"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/admin"), Some(Page::Admin));
        assert_eq!(Page::from_path("/missing"), None);
        assert_eq!(LANDING_PAGE.path(), "/dashboard");
    }
}
