//! Fallback page for unmatched routes.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let location = use_location();
    log::info!("not found: {}", location.pathname.get_untracked());

    let on_back = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ = history.back();
            }
        }
    };

    view! {
        <main class="not-found">
            <h1>"Page Not Found"</h1>
            <p>"Sorry, the page you are looking for doesn't exist or has been moved."</p>
            <p class="not-found__path">{move || location.pathname.get()}</p>
            <div class="not-found__actions">
                <A href="/" attr:class="btn btn--primary">"Go to Home"</A>
                <button class="btn" type="button" on:click=on_back>
                    "Go Back"
                </button>
            </div>
        </main>
    }
}
