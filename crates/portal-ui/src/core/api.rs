//! Contract for the remote API the session core depends on.
//!
//! # Design
//! - The transport is opaque: the core only sees these traits and [`ApiError`].
//! - Futures are `?Send` because the browser runs everything on one cooperative queue.
//! - Message extraction lives on the error so every view applies the same fallback rule.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ErrorBody, LoginResponse, Product, UserIdentity};

/// HTTP status used by the server to reject a missing or stale session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Failures surfaced by API calls.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Decoded error document, when the body carried one.
        body: Option<ErrorBody>,
    },
    /// Request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a rejection carrying a server message.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: Some(ErrorBody {
                message: Some(message.into()),
            }),
        }
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the server rejected the request as unauthorized.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(STATUS_UNAUTHORIZED))
    }

    /// Server-supplied message, ignoring blanks.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                body: Some(ErrorBody {
                    message: Some(message),
                }),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Text to show the user: the server message when present, otherwise `fallback`.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        self.server_message()
            .map_or_else(|| fallback.to_string(), ToString::to_string)
    }
}

/// Authentication endpoints.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a session token and identity.
    ///
    /// The token is not attached to later requests until [`AuthApi::adopt_token`] is called.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Attach `token` to later requests and persist it.
    fn adopt_token(&self, token: String);

    /// Validate a persisted session, returning `None` when there is nothing to restore.
    async fn current_user(&self) -> Result<Option<UserIdentity>, ApiError>;
}

/// Catalogue endpoints.
#[async_trait(?Send)]
pub trait ProductApi {
    /// Fetch the product list for the dashboard.
    async fn products(&self) -> Result<Vec<Product>, ApiError>;
}
