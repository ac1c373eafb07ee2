use crate::core::store::select_user;
use crate::features::admin::state::{AdminView, admin_view};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::role_label_key;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(AdminPage)]
pub(crate) fn admin_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let user = use_selector(select_user);
    let Some(user) = (*user).clone() else {
        return html! {};
    };

    let body = match admin_view(user.role) {
        AdminView::Console => html! {
            <p>{bundle.text("admin.body", "")}</p>
        },
        AdminView::Restricted => html! {
            <p class="muted">
                {bundle.text("admin.restricted", "")}
                {" · "}
                {bundle.text(role_label_key(user.role), "")}
            </p>
        },
    };

    html! {
        <div class="admin">
            <h2>{bundle.text("admin.title", "")}</h2>
            {body}
        </div>
    }
}
