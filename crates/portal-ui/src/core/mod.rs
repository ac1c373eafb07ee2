//! Core, DOM-free primitives for the web client: session, validation, guard, and login flow.
pub mod api;
pub mod auth;
pub mod cancel;
pub mod config;
pub mod expiry;
pub mod guard;
pub mod login;
pub mod session;
pub mod store;
pub mod validation;
