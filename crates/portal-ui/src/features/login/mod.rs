//! Login page. Form state and the submit flow live in [`crate::core::login`].

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::LoginPage;
