//! Landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let greeting = move || {
        auth.with(|a| a.user().map(|u| format!("Welcome back, {}!", u.display_name())))
            .unwrap_or_else(|| "Welcome to Lanceraa".to_owned())
    };

    view! {
        <main class="home">
            <h1 class="home__title">{greeting}</h1>
            <p class="home__subtitle">"Connect with top freelancers in Nepal"</p>
            <Show when=move || !auth.with(AuthState::is_authenticated)>
                <div class="home__actions">
                    <A href="/signup" attr:class="btn btn--primary">"Get started"</A>
                    <A href="/login" attr:class="btn">"Log in"</A>
                </div>
            </Show>
        </main>
    }
}
