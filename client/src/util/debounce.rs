//! Debounce bookkeeping for live email checks.
//!
//! DESIGN
//! ======
//! Each keystroke bumps a generation counter. A scheduled check only fires,
//! and its result is only applied, while its ticket is still the latest
//! generation, so a stale timer or a slow response never overwrites the
//! status of the current value. The last successful lookup is cached with
//! its response so returning to that email replays the result without a call.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use crate::net::types::CheckEmailResponse;
use crate::util::validation::is_valid_email;

/// Handle for one scheduled check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckTicket {
    generation: u64,
    pub email: String,
}

/// What the caller should do with the latest input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Empty or malformed input; reset the status, no call.
    Invalid,
    /// Already checked; re-apply the cached response, no call.
    Cached(CheckEmailResponse),
    /// Sleep for the debounce interval, then check if still current.
    Pending(CheckTicket),
}

#[derive(Clone, Debug, Default)]
pub struct EmailCheckDebouncer {
    generation: u64,
    last_checked: Option<(String, CheckEmailResponse)>,
}

impl EmailCheckDebouncer {
    /// Register a new input value, cancelling any previously scheduled check.
    pub fn schedule(&mut self, email: &str) -> Schedule {
        self.generation = self.generation.wrapping_add(1);
        if email.is_empty() || !is_valid_email(email) {
            return Schedule::Invalid;
        }
        if let Some((checked, resp)) = &self.last_checked {
            if checked == email {
                return Schedule::Cached(resp.clone());
            }
        }
        Schedule::Pending(CheckTicket { generation: self.generation, email: email.to_owned() })
    }

    #[must_use]
    pub fn is_current(&self, ticket: &CheckTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Record a completed check. Returns `false` for stale tickets, whose
    /// result must be discarded.
    pub fn complete(&mut self, ticket: &CheckTicket, resp: &CheckEmailResponse) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.last_checked = Some((ticket.email.clone(), resp.clone()));
        true
    }
}

/// Events delivered by `install_live_check`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveCheck {
    /// Input is empty or malformed.
    Reset,
    Checking,
    Done(CheckEmailResponse),
    /// The lookup failed; the status goes back to unchecked.
    Failed,
}

/// Run a debounced `check-email` whenever `email` settles on a new valid
/// value. Cached values replay their response; stale results are dropped.
#[cfg(feature = "hydrate")]
pub fn install_live_check(email: leptos::prelude::Memo<String>, on_event: impl Fn(LiveCheck) + Clone + 'static) {
    use leptos::prelude::*;

    let debouncer = StoredValue::new(EmailCheckDebouncer::default());
    Effect::new(move || {
        let value = email.get();
        let Some(schedule) = debouncer.try_update_value(|d| d.schedule(&value)) else {
            return;
        };
        match schedule {
            Schedule::Invalid => on_event(LiveCheck::Reset),
            Schedule::Cached(resp) => on_event(LiveCheck::Done(resp)),
            Schedule::Pending(ticket) => {
                let on_event = on_event.clone();
                leptos::task::spawn_local(async move {
                    let delay = std::time::Duration::from_millis(crate::config::EMAIL_CHECK_DEBOUNCE_MS.into());
                    gloo_timers::future::sleep(delay).await;
                    if !debouncer.try_with_value(|d| d.is_current(&ticket)).unwrap_or(false) {
                        return;
                    }
                    on_event(LiveCheck::Checking);
                    let result = crate::net::api::browser_api().check_email(&ticket.email).await;
                    match result {
                        Ok(resp) => {
                            if debouncer.try_update_value(|d| d.complete(&ticket, &resp)).unwrap_or(false) {
                                on_event(LiveCheck::Done(resp));
                            }
                        }
                        Err(e) => {
                            log::debug!("live email check failed: {e}");
                            if debouncer.try_with_value(|d| d.is_current(&ticket)).unwrap_or(false) {
                                on_event(LiveCheck::Failed);
                            }
                        }
                    }
                });
            }
        }
    });
}
