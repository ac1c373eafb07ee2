//! View-lifetime cancellation for pending async work.
//!
//! A view creates a token when it mounts and cancels it in its effect cleanup.
//! Async work checks the token after each await and drops its result once the
//! view is gone, so nothing is applied to a torn-down view.

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag tied to one mounted view.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Fresh, live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owning view as unmounted.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether the owning view is gone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Pass `value` through only while the view is still mounted.
    #[must_use]
    pub fn keep<T>(&self, value: T) -> Option<T> {
        if self.is_cancelled() {
            None
        } else {
            Some(value)
        }
    }
}

impl PartialEq for CancelToken {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}
