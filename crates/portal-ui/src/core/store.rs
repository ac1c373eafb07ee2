//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Pages never keep a private copy of the session; they select from here.

use crate::core::auth::{SessionPhase, SessionState};
use crate::models::UserIdentity;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Signed-in identity and pending expiry notice.
    pub session: SessionState,
}

/// Select the signed-in identity.
#[must_use]
pub fn select_user(store: &AppStore) -> Option<UserIdentity> {
    store.session.user().cloned()
}

/// Select whether a user is signed in.
#[must_use]
pub const fn select_authenticated(store: &AppStore) -> bool {
    store.session.is_authenticated()
}

/// Select the pending expiry notice.
#[must_use]
pub fn select_auth_expired_message(store: &AppStore) -> Option<String> {
    store
        .session
        .auth_expired_message()
        .map(ToString::to_string)
}

/// Select the restore phase.
#[must_use]
pub const fn select_phase(store: &AppStore) -> SessionPhase {
    store.session.phase()
}
