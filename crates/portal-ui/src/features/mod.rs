//! Page-level feature slices.
//!
//! # Design
//! - Each feature keeps its DOM-free state next to its wasm-only view.
//! - API calls go through the core traits so the session interceptor sees them.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod products;
