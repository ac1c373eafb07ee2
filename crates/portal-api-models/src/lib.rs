#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Portal API.
//!
//! The browser client decodes every response through these types so the wire
//! contract lives in one place. Field names follow the JSON the server emits
//! (`camelCase` is never used on this API).
use serde::{Deserialize, Serialize};

/// Closed set of roles a signed-in identity can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator with access to the admin console.
    Admin,
    /// General user.
    User,
}

impl Role {
    /// Whether the role grants administrator capabilities.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Wire value for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

/// Identity of the signed-in user.
///
/// Identities are never edited in place; a new login replaces the whole value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Display name returned by the server.
    pub username: String,
    /// Role used for capability checks and labels.
    pub role: Role,
}

/// Credentials posted to the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address entered on the login form.
    pub email: String,
    /// Password entered on the login form.
    pub password: String,
}

/// Successful login payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token attached to later requests.
    pub token: String,
    /// Identity bound to the token.
    pub user: UserIdentity,
}

/// Catalogue entry shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable product identifier.
    pub id: u64,
    /// Product name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Price in whole New Taiwan dollars.
    pub price: u64,
}

/// Error document returned with non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Human-readable message safe to show to the user.
    pub message: Option<String>,
}
