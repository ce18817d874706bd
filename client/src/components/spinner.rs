//! Loading placeholder.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <div class="spinner__ring"></div>
            <span class="spinner__label">{label.unwrap_or_else(|| "Loading...".to_owned())}</span>
        </div>
    }
}
