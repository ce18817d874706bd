//! Inline alert banner bound to an optional `Alert` signal.

use leptos::prelude::*;

use crate::state::alert::Alert;

#[component]
pub fn AlertBanner(alert: RwSignal<Option<Alert>>) -> impl IntoView {
    move || {
        alert.get().map(|a| {
            view! {
                <div class=a.kind.class() role="alert">
                    <span>{a.message}</span>
                    <button class="alert__close" aria-label="Dismiss" on:click=move |_| alert.set(None)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
