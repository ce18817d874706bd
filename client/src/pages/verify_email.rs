//! Email verification page for `/verify-email/:user_id`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached after initial signup, or after an inactive account tried to log
//! in. A fresh code has already been sent by the time this page mounts.
//!
//! TRADE-OFFS
//! ==========
//! The resend countdown lives only in this page; a reload resets it and the
//! backend stays responsible for real rate limiting.

#[cfg(test)]
#[path = "verify_email_test.rs"]
mod verify_email_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::alert_banner::AlertBanner;
use crate::state::alert::Alert;
use crate::state::verification::CODE_SENT_NOTICE;
use crate::util::auth::install_pending_redirect;
use crate::util::validation::{VERIFICATION_CODE_LEN, normalize_code_input};

#[must_use]
pub fn resend_label(remaining_secs: u64, sending: bool) -> String {
    if remaining_secs > 0 {
        format!("Resend code in {remaining_secs}s")
    } else if sending {
        "Sending...".to_owned()
    } else {
        "Didn't receive code? Resend".to_owned()
    }
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let params = use_params_map();
    let user_id = params.with_untracked(|p| p.get("user_id")).filter(|id| !id.is_empty());

    let redirect = RwSignal::new(None::<String>);
    install_pending_redirect(redirect, use_navigate());

    let code = RwSignal::new(String::new());
    let alert = RwSignal::new(None::<Alert>);
    let busy = RwSignal::new(false);
    let remaining = RwSignal::new(0_u64);
    let sending = RwSignal::new(false);

    let Some(user_id) = user_id else {
        log::warn!("verify-email opened without a user id");
        redirect.set(Some("/login".to_owned()));
        return ().into_any();
    };
    alert.set(Some(Alert::info(CODE_SENT_NOTICE)));

    #[cfg(feature = "hydrate")]
    let flow = {
        use std::rc::Rc;

        use crate::state::verification::VerificationFlow;

        let flow = Rc::new(VerificationFlow::new(
            crate::net::api::browser_api(),
            user_id.clone(),
            crate::config::RESEND_COOLDOWN_SECS,
        ));
        StoredValue::new_local(flow)
    };

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(1_000).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if let Some(secs) = flow.try_with_value(|f| f.cooldown_remaining(now_ms())) {
                    remaining.set(secs);
                }
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        alert.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::state::verification::VERIFIED_MESSAGE;

            let flow = flow.get_value();
            let typed = code.get_untracked();
            leptos::task::spawn_local(async move {
                match flow.verify(&typed).await {
                    Ok(target) => {
                        alert.set(Some(Alert::success(VERIFIED_MESSAGE)));
                        gloo_timers::future::TimeoutFuture::new(crate::config::REDIRECT_DELAY_MS).await;
                        redirect.try_set(Some(target));
                    }
                    Err(message) => alert.set(Some(Alert::error(message))),
                }
                busy.try_set(false);
            });
        }
    };

    let on_resend = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::state::verification::{RESEND_SUCCESS_MESSAGE, ResendResult};

            let flow = flow.get_value();
            sending.set(true);
            leptos::task::spawn_local(async move {
                match flow.resend(now_ms).await {
                    ResendResult::Ignored => {}
                    ResendResult::Sent => {
                        alert.set(Some(Alert::success(RESEND_SUCCESS_MESSAGE)));
                        remaining.try_set(flow.cooldown_remaining(now_ms()));
                    }
                    ResendResult::Failed(message) => alert.set(Some(Alert::error(message))),
                }
                sending.try_set(flow.resend_in_flight());
            });
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-card__title">"Verify Your Email"</h2>
                <p class="auth-card__subtitle">{format!("Account {user_id}")}</p>
                <AlertBanner alert=alert/>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input auth-input--code"
                        type="text"
                        inputmode="numeric"
                        maxlength=VERIFICATION_CODE_LEN.to_string()
                        placeholder="000000"
                        prop:value=move || code.get()
                        on:input=move |ev| code.set(normalize_code_input(&event_target_value(&ev)))
                    />
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || busy.get() || code.with(|c| c.len() != VERIFICATION_CODE_LEN)
                    >
                        {move || if busy.get() { "Verifying..." } else { "Verify email" }}
                    </button>
                </form>
                <button
                    class="btn btn--link"
                    type="button"
                    disabled={move || sending.get() || remaining.get() > 0}
                    on:click=on_resend
                >
                    {move || resend_label(remaining.get(), sending.get())}
                </button>
            </div>
        </div>
    }
    .into_any()
}
