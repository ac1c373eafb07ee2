use crate::app::api::ApiCtx;
use crate::core::cancel::CancelToken;
use crate::features::products::state::{ProductsState, load_products};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::format_price;
use yew::prelude::*;

#[function_component(ProductList)]
pub(crate) fn product_list() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api = use_context::<ApiCtx>();
    let state = use_state(ProductsState::default);

    {
        let state = state.clone();
        let fallback = bundle.text("products.error", "");
        use_effect_with((), move |()| {
            let lifetime = CancelToken::new();
            if let Some(api) = api {
                let lifetime = lifetime.clone();
                yew::platform::spawn_local(async move {
                    if let Some(next) = load_products(&*api.client, &lifetime, &fallback).await {
                        state.set(next);
                    }
                });
            } else {
                state.set(ProductsState::Failed(fallback));
            }
            move || lifetime.cancel()
        });
    }

    let body = match &*state {
        ProductsState::Loading => html! {
            <p class="muted" aria-busy="true">{bundle.text("products.loading", "")}</p>
        },
        ProductsState::Failed(message) => html! {
            <p class="error-text" role="alert">{message}</p>
        },
        ProductsState::Loaded(products) if products.is_empty() => html! {
            <p class="muted">{bundle.text("products.empty", "")}</p>
        },
        ProductsState::Loaded(products) => html! {
            <ul class="product-grid">
                {for products.iter().map(|product| html! {
                    <li class="card" key={product.id.to_string()}>
                        <h4>{&product.name}</h4>
                        <p class="muted">{&product.description}</p>
                        <strong>{format_price(product.price)}</strong>
                    </li>
                })}
            </ul>
        },
    };

    html! {
        <section class="products">
            <h3>{bundle.text("products.title", "")}</h3>
            {body}
        </section>
    }
}
