use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::store::{AppStore, select_user};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::{role_label_key, shows_admin_link};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub(crate) children: Children,
    pub(crate) active: Route,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let user = use_selector(select_user);

    let on_logout = Callback::from(move |_| {
        if let Some(api) = &api {
            api.transport().set_token(None);
            api.session.logout();
        }
        if let Some(navigator) = &navigator {
            navigator.replace(&Route::Login);
        }
    });

    let Some(user) = (*user).clone() else {
        return html! {};
    };
    let nav_link = if props.active == Route::Admin {
        html! { <Link<Route> to={Route::Dashboard} classes="ghost">{bundle.text("nav.back", "")}</Link<Route>> }
    } else if shows_admin_link(user.role) {
        html! { <Link<Route> to={Route::Admin} classes="ghost">{bundle.text("nav.admin", "")}</Link<Route>> }
    } else {
        html! {}
    };

    html! {
        <div class="app-shell">
            <header class="topbar">
                <strong>{bundle.text("app.title", "")}</strong>
                <div class="topbar-user">
                    <span>{bundle.format("dashboard.welcome", &[("name", user.username.as_str())])}</span>
                    <span class="badge">{bundle.text(role_label_key(user.role), "")}</span>
                    {nav_link}
                    <button class="ghost" onclick={on_logout}>{bundle.text("nav.logout", "")}</button>
                </div>
            </header>
            <main class="main-content">
                { for props.children.iter() }
            </main>
        </div>
    }
}
