//! App root: contexts, boot-time session restore, and routing.
//!
//! # Design
//! - One API client and one session handle per boot, shared through contexts.
//! - A persisted token is validated once at boot; pages stay pending until that finishes.
//! - Every page renders behind the route guard.

use crate::app::api::ApiCtx;
use crate::components::guard::RouteGuard;
use crate::components::shell::AppShell;
use crate::core::api::AuthApi;
use crate::core::guard::{LANDING_PAGE, Page};
use crate::core::auth::SessionPhase;
use crate::core::session::AuthSession;
use crate::features::admin::AdminPage;
use crate::features::dashboard::DashboardPage;
use crate::features::login::LoginPage;
use crate::i18n::TranslationBundle;
use log::{info, warn};
use preferences::{api_base_url, load_locale, load_log_level, load_token};
pub(crate) use routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::Context;

pub(crate) mod api;
mod logging;
pub(crate) mod preferences;
mod routes;

#[function_component(PortalApp)]
pub(crate) fn portal_app() -> Html {
    let locale = use_state(load_locale);
    let bundle = {
        let locale = *locale;
        use_memo(locale, |locale| TranslationBundle::new(*locale))
    };
    // Runs before the first render, so the guard sees `Restoring` from the start.
    let api_ctx = {
        let expired = bundle.text("session.expired", "");
        use_memo((), move |()| {
            let token = load_token();
            let session = AuthSession::boot(&Context::new(), token.is_some());
            ApiCtx::new(api_base_url(), token, session, expired)
        })
    };

    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with((), move |()| {
            restore_session(api_ctx);
            || ()
        });
    }

    html! {
        <ContextProvider<Context> context={api_ctx.session.context().clone()}>
            <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
                <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                    <BrowserRouter>
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </ContextProvider<TranslationBundle>>
            </ContextProvider<ApiCtx>>
        </ContextProvider<Context>>
    }
}

fn switch(route: Route) -> Html {
    let Some(page) = route.page() else {
        return html! { <Redirect<Route> to={Route::from(LANDING_PAGE)} /> };
    };
    let body = match page {
        Page::Login => return html! { <RouteGuard {page}><LoginPage /></RouteGuard> },
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Admin => html! { <AdminPage /> },
    };
    html! {
        <RouteGuard {page}>
            <AppShell active={route}>{body}</AppShell>
        </RouteGuard>
    }
}

fn restore_session(api_ctx: ApiCtx) {
    if api_ctx.session.phase() != SessionPhase::Restoring {
        return;
    }
    let session = api_ctx.session.clone();
    yew::platform::spawn_local(async move {
        match api_ctx.client.current_user().await {
            Ok(identity) => session.finish_restore(identity),
            Err(err) => {
                warn!("session restore failed: {err}");
                api_ctx.transport().set_token(None);
                session.finish_restore(None);
            }
        }
    });
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    logging::init(load_log_level());
    info!("portal ui starting");
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<PortalApp>::with_root(root).render();
    } else {
        yew::Renderer::<PortalApp>::new().render();
    }
}
