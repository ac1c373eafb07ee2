//! Session expiry detection for authenticated API calls.
//!
//! # Design
//! - Wrap any API implementation; pages never handle expiry themselves.
//! - Only requests made on behalf of a signed-in user can expire a session.
//!   A rejected login is a bad password, and a rejected restore means there was no session.
//! - A rejection that arrives after the session already ended does not raise a second notice.

use async_trait::async_trait;
use log::{debug, warn};

use crate::core::api::{ApiError, AuthApi, ProductApi};
use crate::core::session::AuthSession;
use crate::models::{LoginResponse, Product, UserIdentity};

/// API wrapper that turns unauthorized responses into a session expiry.
pub struct SessionExpiryInterceptor<A> {
    inner: A,
    session: AuthSession,
    fallback_message: String,
}

impl<A> SessionExpiryInterceptor<A> {
    /// Wrap `inner`, using `fallback_message` when the server gives no reason.
    pub fn new(inner: A, session: AuthSession, fallback_message: impl Into<String>) -> Self {
        Self {
            inner,
            session,
            fallback_message: fallback_message.into(),
        }
    }

    /// Wrapped implementation.
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    /// Inspect the outcome of an authenticated request.
    ///
    /// # Errors
    /// Returns the original error unchanged after signalling expiry when it applies.
    pub fn observe<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            if err.is_unauthorized() {
                if self.session.is_authenticated() {
                    warn!("authenticated request rejected as unauthorized");
                    self.session
                        .mark_session_expired(err.display_message(&self.fallback_message));
                } else {
                    debug!("unauthorized response after sign-out ignored");
                }
            }
        }
        result
    }
}

#[async_trait(?Send)]
impl<A: AuthApi> AuthApi for SessionExpiryInterceptor<A> {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.inner.login(email, password).await
    }

    fn adopt_token(&self, token: String) {
        self.inner.adopt_token(token);
    }

    async fn current_user(&self) -> Result<Option<UserIdentity>, ApiError> {
        self.inner.current_user().await
    }
}

#[async_trait(?Send)]
impl<A: ProductApi> ProductApi for SessionExpiryInterceptor<A> {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let result = self.inner.products().await;
        self.observe(result)
    }
}
