//! Landing page after a successful email verification.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

#[component]
pub fn CompleteProfilePage() -> impl IntoView {
    let params = use_params_map();
    let user_id = move || params.with(|p| p.get("user_id")).unwrap_or_default();

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-card__title">"Email Verified"</h2>
                <p class="auth-card__subtitle">
                    "Your account is active. Log in to finish setting up your profile."
                </p>
                <p class="auth-form__hint">{move || format!("Account {}", user_id())}</p>
                <A href="/login" attr:class="btn btn--primary">"Continue to login"</A>
            </div>
        </div>
    }
}
