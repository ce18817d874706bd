//! `/logout`: end the session, then return to login.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::spinner::Spinner;
#[cfg(feature = "hydrate")]
use crate::state::auth::AuthState;
use crate::util::auth::install_pending_redirect;

#[component]
pub fn LogoutPage() -> impl IntoView {
    let redirect = RwSignal::new(None::<String>);
    install_pending_redirect(redirect, use_navigate());

    #[cfg(feature = "hydrate")]
    {
        let auth = expect_context::<RwSignal<AuthState>>();
        leptos::task::spawn_local(async move {
            let state = crate::state::session::browser_session().logout().await;
            auth.set(state);
            redirect.try_set(Some("/login".to_owned()));
        });
    }

    view! { <Spinner label="Signing out..."/> }
}
