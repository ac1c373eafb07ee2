//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - Every page talks to the client through the expiry interceptor.

use crate::core::expiry::SessionExpiryInterceptor;
use crate::core::session::AuthSession;
use crate::services::api::ApiClient;
use std::rc::Rc;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance behind the expiry interceptor.
    pub(crate) client: Rc<SessionExpiryInterceptor<ApiClient>>,
    /// Session the client reports expiry into.
    pub(crate) session: AuthSession,
}

impl ApiCtx {
    /// Create a new context with the configured base URL and any persisted token.
    pub(crate) fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        session: AuthSession,
        expired_message: impl Into<String>,
    ) -> Self {
        Self {
            client: Rc::new(SessionExpiryInterceptor::new(
                ApiClient::new(base_url, token),
                session.clone(),
                expired_message,
            )),
            session,
        }
    }

    /// Raw transport, for token bookkeeping.
    pub(crate) fn transport(&self) -> &ApiClient {
        self.client.inner()
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
