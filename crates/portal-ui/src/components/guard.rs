//! Page wrapper enforcing the route guard.
//!
//! # Design
//! - Re-evaluates on every session change through the store selector.
//! - Redirects run in an effect so the guarded page never renders first.

use crate::app::Route;
use crate::core::guard::{GuardDecision, Page, evaluate_page};
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct RouteGuardProps {
    pub(crate) page: Page,
    pub(crate) children: Children,
}

#[function_component(RouteGuard)]
pub(crate) fn route_guard(props: &RouteGuardProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session = use_selector(|store: &AppStore| store.session.clone());
    let decision = evaluate_page(props.page, &session);
    let navigator = use_navigator();

    use_effect_with((props.page, decision), move |(_, decision)| {
        if let (GuardDecision::Redirect(navigation), Some(navigator)) = (decision, navigator) {
            let route = Route::from(navigation.to);
            if navigation.replace {
                navigator.replace(&route);
            } else {
                navigator.push(&route);
            }
        }
        || ()
    });

    match decision {
        GuardDecision::Render => html! { <>{ for props.children.iter() }</> },
        GuardDecision::Pending => html! {
            <div class="guard-pending" aria-busy="true">
                <p class="muted">{bundle.text("session.restoring", "")}</p>
            </div>
        },
        GuardDecision::Redirect(_) => html! {},
    }
}
