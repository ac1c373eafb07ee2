//! Routing definitions for the portal UI.
use crate::core::guard::Page;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Guarded page behind the route, if any.
    pub(crate) const fn page(&self) -> Option<Page> {
        match self {
            Self::Login => Some(Page::Login),
            Self::Dashboard => Some(Page::Dashboard),
            Self::Admin => Some(Page::Admin),
            Self::Root | Self::NotFound => None,
        }
    }
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::Login => Self::Login,
            Page::Dashboard => Self::Dashboard,
            Page::Admin => Self::Admin,
        }
    }
}
