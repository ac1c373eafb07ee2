//! Browser transport clients.

pub(crate) mod api;
