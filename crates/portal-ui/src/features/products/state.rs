//! Product listing state.
//!
//! # Design
//! - Fetch failures stay inline on the page; they never touch the session or navigation.
//! - Results that arrive after the page unmounted are dropped.

use log::{debug, warn};

use crate::core::api::ProductApi;
use crate::core::cancel::CancelToken;
use crate::models::Product;

/// What the product list shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProductsState {
    /// Request in flight.
    #[default]
    Loading,
    /// Products received.
    Loaded(Vec<Product>),
    /// Request failed; message shown inline.
    Failed(String),
}

impl ProductsState {
    /// Whether the loading indicator is shown.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Fetch products for a mounted view.
///
/// Returns `None` when the view unmounted before the response arrived.
pub async fn load_products<A: ProductApi + ?Sized>(
    api: &A,
    lifetime: &CancelToken,
    failure_fallback: &str,
) -> Option<ProductsState> {
    let result = api.products().await;
    if lifetime.is_cancelled() {
        debug!("product list discarded: view unmounted");
        return None;
    }
    Some(match result {
        Ok(products) => ProductsState::Loaded(products),
        Err(err) => {
            warn!("product list failed: {err}");
            ProductsState::Failed(err.display_message(failure_fallback))
        }
    })
}
