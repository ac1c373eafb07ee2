use std::rc::Rc;

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::cancel::CancelToken;
use crate::core::login::{LoginFlow, LoginForm, LoginOutcome, SubmitOutcome};
use crate::core::validation::ValidationError;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let form = use_mut_ref(LoginForm::new);
    let redraw = use_force_update();
    let lifetime = use_memo((), |()| CancelToken::new());
    let notice = use_state(|| None as Option<String>);

    {
        let lifetime = (*lifetime).clone();
        let notice = notice.clone();
        let session = api.as_ref().map(|api| api.session.clone());
        use_effect_with((), move |()| {
            if let Some(session) = session {
                notice.set(session.take_auth_expired_message());
            }
            move || lifetime.cancel()
        });
    }

    let on_email = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if form.borrow_mut().set_email(input.value()) {
                    redraw.force_update();
                }
            }
        })
    };
    let on_password = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if form.borrow_mut().set_password(input.value()) {
                    redraw.force_update();
                }
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        let redraw = redraw.clone();
        let lifetime = (*lifetime).clone();
        let fallback = bundle.text("login.failed", "");
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(api) = api.clone() else {
                return;
            };
            let outcome = form.borrow_mut().submit();
            redraw.force_update();
            let SubmitOutcome::Dispatch(pending) = outcome else {
                return;
            };
            let flow = LoginFlow::new(
                Rc::clone(&api.client),
                api.session.clone(),
                lifetime.clone(),
                fallback.clone(),
            );
            let form = form.clone();
            let redraw = redraw.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let Some(outcome) = flow.dispatch(pending, &form).await else {
                    return;
                };
                redraw.force_update();
                if let (LoginOutcome::SignedIn { navigation, .. }, Some(navigator)) =
                    (outcome, navigator)
                {
                    navigator.replace(&Route::from(navigation.to));
                }
            });
        })
    };

    let form = form.borrow();
    let disabled = form.is_disabled();
    let errors = form.field_errors();
    let field_error = |reason: Option<ValidationError>| {
        reason.map_or_else(
            || html! {},
            |reason| html! { <p class="error-text">{bundle.text(reason.message_key(), "")}</p> },
        )
    };

    html! {
        <div class="login-page">
            <form class="card" onsubmit={on_submit} novalidate={true}>
                <header>
                    <h2>{bundle.text("login.title", "")}</h2>
                    <p class="muted">{bundle.text("login.subtitle", "")}</p>
                </header>
                {if let Some(message) = &*notice {
                    html! { <p class="notice" role="alert">{message}</p> }
                } else { html! {} }}
                <label class="stack">
                    <span>{bundle.text("login.email", "")}</span>
                    <input
                        type="email"
                        value={form.email().to_string()}
                        placeholder={bundle.text("login.email_placeholder", "")}
                        oninput={on_email}
                        {disabled}
                    />
                </label>
                {field_error(errors.email)}
                <label class="stack">
                    <span>{bundle.text("login.password", "")}</span>
                    <input
                        type="password"
                        value={form.password().to_string()}
                        placeholder={bundle.text("login.password_placeholder", "")}
                        oninput={on_password}
                        {disabled}
                    />
                </label>
                {field_error(errors.password)}
                {if let Some(message) = form.error_message() {
                    html! { <p class="error-text" role="alert">{message}</p> }
                } else { html! {} }}
                <button class="solid" type="submit" {disabled}>
                    {if disabled { bundle.text("login.submitting", "") } else { bundle.text("login.submit", "") }}
                </button>
            </form>
        </div>
    }
}
