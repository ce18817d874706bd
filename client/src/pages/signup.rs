//! Signup page: email availability, then password, then verification.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::alert_banner::AlertBanner;
use crate::components::step_indicator::StepIndicator;
use crate::state::alert::Alert;
use crate::state::signup::{Availability, SignupStep, SignupWizard};
use crate::util::auth::install_pending_redirect;
use crate::util::validation::PasswordChecks;

/// Label for the strength meter given the number of satisfied predicates.
#[must_use]
pub fn strength_label(strength: usize) -> &'static str {
    match strength {
        0 | 1 => "Weak",
        2 | 3 => "Fair",
        4 => "Good",
        _ => "Strong",
    }
}

/// Meter width in percent.
#[must_use]
pub fn strength_percent(strength: usize) -> usize {
    strength.min(5) * 20
}

#[must_use]
pub fn availability_hint(availability: Availability) -> Option<&'static str> {
    match availability {
        Availability::Unchecked => None,
        Availability::Checking => Some("Checking availability..."),
        Availability::Available => Some("Email is available"),
        Availability::Taken => Some("Email already registered. Please log in."),
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let wizard = RwSignal::new(SignupWizard::default());
    let alert = RwSignal::new(None::<Alert>);
    let busy = RwSignal::new(false);
    let redirect = RwSignal::new(None::<String>);
    install_pending_redirect(redirect, use_navigate());

    #[cfg(feature = "hydrate")]
    {
        use crate::util::debounce::{LiveCheck, install_live_check};

        let email = Memo::new(move |_| wizard.with(|w| w.email.trim().to_owned()));
        install_live_check(email, move |event| {
            let availability = match event {
                LiveCheck::Reset | LiveCheck::Failed => Availability::Unchecked,
                LiveCheck::Checking => Availability::Checking,
                LiveCheck::Done(resp) => Availability::from_response(&resp),
            };
            wizard.try_update(|w| w.availability = availability);
        });
    }

    let on_email_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        alert.set(None);
        let email = match wizard.with_untracked(SignupWizard::email_for_check) {
            Ok(email) => email,
            Err(message) => {
                alert.set(Some(Alert::error(message)));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::browser_api();
            match crate::state::signup::check_availability(&api, &email).await {
                Ok(resp) => {
                    let mut outcome = Ok(());
                    wizard.update(|w| outcome = w.accept_email_check(&resp));
                    if let Err(message) = outcome {
                        alert.set(Some(Alert::error(message)));
                    }
                }
                Err(message) => alert.set(Some(Alert::error(message))),
            }
            busy.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email;
    };

    let on_signup_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        alert.set(None);
        if let Err(message) = wizard.with_untracked(SignupWizard::validate_passwords) {
            alert.set(Some(Alert::error(message)));
            return;
        }
        let (email, password, confirm) =
            wizard.with_untracked(|w| (w.email.trim().to_owned(), w.password.clone(), w.confirm_password.clone()));
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::state::signup::{SIGNUP_SUCCESS_MESSAGE, register};

            let api = crate::net::api::browser_api();
            match register(&api, &crate::util::storage::LocalStorage, &email, &password, &confirm).await {
                Ok(user_id) => {
                    let mut target = String::new();
                    wizard.update(|w| target = w.complete(user_id));
                    alert.set(Some(Alert::success(SIGNUP_SUCCESS_MESSAGE)));
                    gloo_timers::future::TimeoutFuture::new(crate::config::REDIRECT_DELAY_MS).await;
                    redirect.try_set(Some(target));
                }
                Err(message) => alert.set(Some(Alert::error(message))),
            }
            busy.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (email, password, confirm);
    };

    let step = Signal::derive(move || wizard.with(|w| w.step().number()));
    let checks = Memo::new(move |_| wizard.with(SignupWizard::password_checks));
    let on_back = move |_| {
        alert.set(None);
        wizard.update(SignupWizard::back);
    };

    let requirement = move |label: &'static str, met: fn(&PasswordChecks) -> bool| {
        view! {
            <li class=move || if met(&checks.get()) { "req req--met" } else { "req" }>{label}</li>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-card__title">
                    {move || match wizard.with(|w| w.step().clone()) {
                        SignupStep::EmailEntry => "Create Account",
                        SignupStep::PasswordEntry => "Set Password",
                        SignupStep::Submitted { .. } => "Check Your Email",
                    }}
                </h2>
                <StepIndicator current=step total=3/>
                <AlertBanner alert=alert/>
                <Show when=move || wizard.with(|w| *w.step() == SignupStep::EmailEntry)>
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
                            availability_hint(wizard.with(|w| w.availability))
                                .map(|hint| view! { <p class="auth-form__hint">{hint}</p> })
                        }}
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Checking..." } else { "Continue" }}
                        </button>
                    </form>
                </Show>
                <Show when=move || wizard.with(|w| *w.step() == SignupStep::PasswordEntry)>
                    <form class="auth-form" on:submit=on_signup_submit>
                        <p class="auth-form__email">{move || wizard.with(|w| w.email.clone())}</p>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Password"
                            autocomplete="new-password"
                            prop:value=move || wizard.with(|w| w.password.clone())
                            on:input=move |ev| wizard.update(|w| w.password = event_target_value(&ev))
                        />
                        <div class="meter">
                            <div
                                class="meter__bar"
                                style:width=move || format!("{}%", strength_percent(checks.get().strength()))
                            ></div>
                        </div>
                        <p class="auth-form__hint">
                            {move || strength_label(checks.get().strength())}
                            " · "
                            {move || checks.get().first_missing().map_or("All requirements met", |r| r.hint())}
                        </p>
                        <ul class="requirements">
                            {requirement("At least 8 characters", |c| c.min_length)}
                            {requirement("Uppercase letter", |c| c.has_uppercase)}
                            {requirement("Lowercase letter", |c| c.has_lowercase)}
                            {requirement("Number", |c| c.has_number)}
                            {requirement("Special character (@$!%*?&)", |c| c.has_special)}
                        </ul>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Confirm password"
                            autocomplete="new-password"
                            prop:value=move || wizard.with(|w| w.confirm_password.clone())
                            on:input=move |ev| wizard.update(|w| w.confirm_password = event_target_value(&ev))
                        />
                        <div class="auth-form__actions">
                            <button class="btn" type="button" on:click=on_back>
                                "Back"
                            </button>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Creating account..." } else { "Create account" }}
                            </button>
                        </div>
                    </form>
                </Show>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <A href="/login">"Log in"</A>
                </p>
            </div>
        </div>
    }
}
