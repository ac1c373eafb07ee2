//! Shared page chrome.

pub(crate) mod guard;
pub(crate) mod shell;
