//! Signed-in user's profile summary. Protected by the route guard.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::{AccountStatus, User};
use crate::state::auth::AuthState;

fn full_name(user: &User) -> String {
    let name = user.display_name();
    if name == user.username { "Not provided".to_owned() } else { name }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    move || {
        let Some(user) = auth.with(|a| a.user().cloned()) else {
            return ().into_any();
        };
        let status = user.account_status();
        let status_class = match status {
            AccountStatus::Active => "status status--active",
            AccountStatus::PendingVerification => "status status--pending",
        };
        let complete_href = format!("/complete-profile/{}", user.id);
        let notice = user.needs_profile().then(|| {
            view! {
                <div class="profile__notice">
                    <p>"Your profile is incomplete. Please fill in all the required information."</p>
                    <A href=complete_href attr:class="btn">"Complete Profile"</A>
                </div>
            }
        });
        view! {
            <main class="profile">
                <h1>{format!("Welcome, {}!", user.display_name())}</h1>
                <section class="profile__card">
                    <h2>"Personal Information"</h2>
                    <dl class="profile__fields">
                        <dt>"Name"</dt>
                        <dd>{full_name(&user)}</dd>
                        <dt>"Username"</dt>
                        <dd>{user.username.clone()}</dd>
                        <dt>"Email"</dt>
                        <dd>{user.email.clone()}</dd>
                        <dt>"Account Status"</dt>
                        <dd class=status_class>{status.label()}</dd>
                    </dl>
                </section>
                {notice}
                <A href="/logout" attr:class="btn btn--danger">"Log out"</A>
            </main>
        }
        .into_any()
    }
}
