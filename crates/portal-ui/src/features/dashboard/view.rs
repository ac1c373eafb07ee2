use crate::features::products::view::ProductList;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));

    html! {
        <div class="dashboard">
            <h2>{bundle.text("dashboard.title", "")}</h2>
            <ProductList />
        </div>
    }
}
