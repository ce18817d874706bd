//! Route guard wrapper around the routed page tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sits inside the `Router` so it can read the location. While auth is
//! loading, and while a redirect is pending, a spinner is rendered instead
//! of the page.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::components::spinner::Spinner;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, guard_decision, install_auth_guard};

#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let query = use_query_map();
    let path = location.pathname;
    let from = Memo::new(move |_| query.read().get("from"));

    install_auth_guard(auth, path, from, use_navigate());

    let renders = move || guard_decision(&auth.get(), &path.get(), from.get().as_deref()) == GuardDecision::Render;

    view! {
        <Show when=renders fallback=|| view! { <Spinner/> }>
            {children()}
        </Show>
    }
}
