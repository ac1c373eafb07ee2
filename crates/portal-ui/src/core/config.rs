//! Client configuration constants and pure helpers.
//!
//! # Design
//! - Keep environment-derived decisions here so they can be tested off-browser.
//! - Browser lookups (window location, storage) stay in `app::preferences`.

use log::LevelFilter;

/// Login page path.
pub const LOGIN_PATH: &str = "/login";
/// Landing page path.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Admin console path.
pub const ADMIN_PATH: &str = "/admin";

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "portal.auth.token";
/// Storage key holding the preferred locale.
pub const LOCALE_KEY: &str = "portal.locale";
/// Storage key holding the console log level.
pub const LOG_LEVEL_KEY: &str = "portal.log_level";

/// Fallback API origin when the page location cannot be parsed.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:7070";

/// Map the page's port to the API port: the dev server on `8080` talks to the API on `7070`.
#[must_use]
pub fn map_api_port(page_port: &str) -> Option<&str> {
    match page_port {
        "" => None,
        "8080" => Some("7070"),
        other => Some(other),
    }
}

/// Build the API origin from the page's protocol, host, and port.
#[must_use]
pub fn api_base_from_parts(protocol: &str, host: &str, port: &str) -> String {
    let mut base = format!("{protocol}//{host}");
    if let Some(port) = map_api_port(port) {
        base.push(':');
        base.push_str(port);
    }
    base
}

/// Normalize a configured base URL (trailing slashes dropped, blanks rejected).
#[must_use]
pub fn normalize_base_url(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a stored log level, defaulting to `info`.
#[must_use]
pub fn parse_log_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}
