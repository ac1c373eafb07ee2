//! Persistence and environment helpers for the app shell.

use crate::core::config::{
    DEFAULT_API_BASE_URL, LOCALE_KEY, LOG_LEVEL_KEY, TOKEN_KEY, api_base_from_parts,
    normalize_base_url, parse_log_level,
};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use log::LevelFilter;
use serde::Serialize;
use web_sys::Url;

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(nav) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&nav) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn load_log_level() -> LevelFilter {
    let stored = LocalStorage::get::<String>(LOG_LEVEL_KEY).ok();
    parse_log_level(stored.as_deref())
}

pub(crate) fn load_token() -> Option<String> {
    let value = LocalStorage::get::<String>(TOKEN_KEY).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}

pub(crate) fn persist_token(token: &str) {
    set_storage(TOKEN_KEY, token);
}

pub(crate) fn clear_token() {
    LocalStorage::delete(TOKEN_KEY);
}

pub(crate) fn api_base_url() -> String {
    if let Some(configured) = option_env!("PORTAL_API_BASE_URL").and_then(normalize_base_url) {
        return configured;
    }
    let Ok(href) = window().location().href() else {
        return DEFAULT_API_BASE_URL.to_string();
    };
    match Url::new(&href) {
        Ok(url) => api_base_from_parts(&url.protocol(), &url.hostname(), &url.port()),
        Err(_) => DEFAULT_API_BASE_URL.to_string(),
    }
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
