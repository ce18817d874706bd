//! Login page: email lookup, then password.
//!
//! SYSTEM CONTEXT
//! ==============
//! Flow decisions live in `state::login` and `state::session`; this page
//! wires them to inputs, the alert banner and navigation.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_query_map;

use crate::components::alert_banner::AlertBanner;
use crate::components::step_indicator::StepIndicator;
use crate::state::alert::Alert;
#[cfg(feature = "hydrate")]
use crate::state::auth::AuthState;
use crate::state::login::{EmailStatus, LoginStep, LoginWizard};
use crate::util::auth::install_pending_redirect;

/// Hint under the email field for the live lookup.
#[must_use]
pub fn email_status_hint(status: EmailStatus) -> Option<&'static str> {
    match status {
        EmailStatus::Unchecked => None,
        EmailStatus::Checking => Some("Checking email..."),
        EmailStatus::NotFound => Some("Email not found. Need an account?"),
        EmailStatus::Found => Some("Account found"),
        EmailStatus::Inactive => Some("This account still needs email verification"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let wizard = RwSignal::new(LoginWizard::default());
    let alert = RwSignal::new(None::<Alert>);
    let busy = RwSignal::new(false);
    let redirect = RwSignal::new(None::<String>);
    install_pending_redirect(redirect, use_navigate());

    #[cfg(feature = "hydrate")]
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let query = use_query_map();

    #[cfg(feature = "hydrate")]
    {
        use crate::util::debounce::{LiveCheck, install_live_check};

        let email = Memo::new(move |_| wizard.with(|w| w.email.trim().to_owned()));
        install_live_check(email, move |event| {
            let status = match event {
                LiveCheck::Reset | LiveCheck::Failed => EmailStatus::Unchecked,
                LiveCheck::Checking => EmailStatus::Checking,
                LiveCheck::Done(resp) => EmailStatus::from_response(&resp),
            };
            wizard.try_update(|w| w.status = status);
        });
    }

    let on_email_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        alert.set(None);
        let email = match wizard.with_untracked(LoginWizard::email_for_check) {
            Ok(email) => email,
            Err(message) => {
                alert.set(Some(Alert::error(message)));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::state::login::{EMAIL_NOT_FOUND_MESSAGE, EmailStepResult, NEEDS_VERIFICATION_MESSAGE, check_email_step};

            leptos::task::spawn_local(async move {
                let session = crate::state::session::browser_session();
                match check_email_step(&session, &email).await {
                    Ok(result) => {
                        wizard.update(|w| w.apply_email_step(&result));
                        match result {
                            EmailStepResult::Password => {}
                            EmailStepResult::NotFound => alert.set(Some(Alert::error(EMAIL_NOT_FOUND_MESSAGE))),
                            EmailStepResult::Verify { redirect: target, .. } => {
                                alert.set(Some(Alert::warning(NEEDS_VERIFICATION_MESSAGE)));
                                gloo_timers::future::TimeoutFuture::new(crate::config::REDIRECT_DELAY_MS).await;
                                redirect.try_set(Some(target));
                            }
                        }
                    }
                    Err(message) => alert.set(Some(Alert::error(message))),
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = email;
    };

    let on_login_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        alert.set(None);
        let (email, password) = match wizard.with_untracked(LoginWizard::credentials) {
            Ok(credentials) => credentials,
            Err(message) => {
                alert.set(Some(Alert::error(message)));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::state::login::{LOGIN_FAILED_MESSAGE, LOGIN_SUCCESS_MESSAGE, NEEDS_VERIFICATION_MESSAGE};
            use crate::state::session::LoginOutcome;

            let from = query.with_untracked(|q| q.get("from"));
            leptos::task::spawn_local(async move {
                let session = crate::state::session::browser_session();
                match session.login(&email, &password, from.as_deref()).await {
                    Ok(LoginOutcome::SignedIn { user, .. }) => {
                        alert.set(Some(Alert::success(LOGIN_SUCCESS_MESSAGE)));
                        // The route guard moves signed-in users off /login to `from` or home.
                        auth.set(AuthState::Confirmed(user));
                    }
                    Ok(LoginOutcome::VerificationRequired { redirect: target, .. }) => {
                        alert.set(Some(Alert::warning(NEEDS_VERIFICATION_MESSAGE)));
                        gloo_timers::future::TimeoutFuture::new(crate::config::REDIRECT_DELAY_MS).await;
                        redirect.try_set(Some(target));
                    }
                    Err(e) => alert.set(Some(Alert::error(e.user_message(LOGIN_FAILED_MESSAGE)))),
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (email, password);
    };

    let step = Signal::derive(move || wizard.with(|w| w.step().number()));
    let on_back = move |_| {
        alert.set(None);
        wizard.update(LoginWizard::back);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-card__title">
                    {move || match wizard.with(LoginWizard::step) {
                        LoginStep::EmailEntry => "Welcome Back",
                        LoginStep::PasswordEntry => "Enter Password",
                    }}
                </h2>
                <StepIndicator current=step total=2/>
                <AlertBanner alert=alert/>
                <Show
                    when=move || wizard.with(LoginWizard::step) == LoginStep::EmailEntry
                    fallback=move || {
                        view! {
                            <form class="auth-form" on:submit=on_login_submit>
                                <p class="auth-form__email">{move || wizard.with(|w| w.email.clone())}</p>
                                <input
                                    class="auth-input"
                                    type="password"
                                    placeholder="Password"
                                    autocomplete="current-password"
                                    prop:value=move || wizard.with(|w| w.password.clone())
                                    on:input=move |ev| wizard.update(|w| w.password = event_target_value(&ev))
                                />
                                <div class="auth-form__actions">
                                    <button class="btn" type="button" on:click=on_back>
                                        "Back"
                                    </button>
                                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                                    </button>
                                </div>
                            </form>
                        }
                    }
                >
                    <form class="auth-form" on:submit=on_email_submit>
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="you@example.com"
                            autocomplete="email"
                            prop:value=move || wizard.with(|w| w.email.clone())
                            on:input=move |ev| wizard.update(|w| w.email = event_target_value(&ev))
                        />
                        {move || {
                            email_status_hint(wizard.with(|w| w.status))
                                .map(|hint| view! { <p class="auth-form__hint">{hint}</p> })
                        }}
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Checking..." } else { "Continue" }}
                        </button>
                    </form>
                </Show>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <A href="/signup">"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
