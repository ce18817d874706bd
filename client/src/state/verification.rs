//! Email verification: code submission and throttled resend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `VerifyEmailPage` builds one `VerificationFlow` per user id from the route.
//! Both the submit button and the resend link go through it so the cooldown
//! and in-flight guard are shared by every click handler on the page.
//!
//! ERROR HANDLING
//! ==============
//! Expired codes are told apart from wrong codes by the `X-Error-Code`
//! header, or by "expired" in the server detail when the header is absent.

#[cfg(test)]
#[path = "verification_test.rs"]
mod verification_test;

use std::cell::Cell;

use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpClient;
use crate::net::types::ResendVerificationRequest;
use crate::util::cooldown::ResendGate;
use crate::util::validation::{normalize_code_input, validate_verification_code};

pub const EXPIRED_CODE: &str = "EXPIRED_CODE";
pub const EXPIRED_MESSAGE: &str = "Verification code has expired. Please request a new one.";
pub const INVALID_CODE_MESSAGE: &str = "Verification failed. Please check your code.";
pub const CODE_SENT_NOTICE: &str = "We've sent a verification code to your email address.";
pub const RESEND_SUCCESS_MESSAGE: &str = "Verification code sent! Please check your email.";
pub const RESEND_FAILED_MESSAGE: &str = "Failed to resend verification code.";
pub const VERIFIED_MESSAGE: &str = "Email verified successfully! Redirecting to complete your profile...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyFailure {
    Expired,
    Invalid(String),
}

impl VerifyFailure {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Expired => EXPIRED_MESSAGE,
            Self::Invalid(message) => message,
        }
    }
}

#[must_use]
pub fn classify_verify_failure(err: &ApiError) -> VerifyFailure {
    match err {
        ApiError::Http { error_code: Some(code), .. } if code == EXPIRED_CODE => VerifyFailure::Expired,
        ApiError::Http { detail: Some(detail), .. } if detail.contains("expired") => VerifyFailure::Expired,
        _ => VerifyFailure::Invalid(err.user_message(INVALID_CODE_MESSAGE)),
    }
}

#[must_use]
pub fn complete_profile_path(user_id: &str) -> String {
    format!("/complete-profile/{user_id}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResendResult {
    /// Blocked by the cooldown or an in-flight request; nothing was sent.
    Ignored,
    Sent,
    Failed(String),
}

pub struct VerificationFlow<H> {
    api: ApiClient<H>,
    user_id: String,
    gate: Cell<ResendGate>,
}

impl<H: HttpClient> VerificationFlow<H> {
    pub fn new(api: ApiClient<H>, user_id: impl Into<String>, cooldown_secs: u64) -> Self {
        Self { api, user_id: user_id.into(), gate: Cell::new(ResendGate::new(cooldown_secs)) }
    }

    pub fn api(&self) -> &ApiClient<H> {
        &self.api
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Seconds until another resend is accepted.
    pub fn cooldown_remaining(&self, now_ms: u64) -> u64 {
        self.gate.get().remaining_secs(now_ms)
    }

    pub fn resend_in_flight(&self) -> bool {
        self.gate.get().in_flight()
    }

    /// Submit the typed code. On success returns the complete-profile path.
    ///
    /// # Errors
    ///
    /// Returns the inline validation message, or the classified failure text.
    pub async fn verify(&self, raw_code: &str) -> Result<String, String> {
        let code = normalize_code_input(raw_code);
        validate_verification_code(&code).map_err(str::to_owned)?;
        match self.api.verify_email(&self.user_id, &code).await {
            Ok(()) => {
                log::info!("email verified for user {}", self.user_id);
                Ok(complete_profile_path(&self.user_id))
            }
            Err(e) => Err(classify_verify_failure(&e).message().to_owned()),
        }
    }

    /// Request a new code unless the gate is closed. `now` is sampled at the
    /// start and again when the response lands.
    pub async fn resend(&self, now: impl Fn() -> u64) -> ResendResult {
        let mut gate = self.gate.get();
        if !gate.try_begin(now()) {
            return ResendResult::Ignored;
        }
        self.gate.set(gate);

        let result = self
            .api
            .resend_verification(ResendVerificationRequest::ByUserId { user_id: &self.user_id })
            .await;

        let mut gate = self.gate.get();
        gate.finish(now(), result.is_ok());
        self.gate.set(gate);

        match result {
            Ok(_) => ResendResult::Sent,
            Err(e) => {
                log::warn!("resend verification failed: {e}");
                ResendResult::Failed(e.user_message(RESEND_FAILED_MESSAGE))
            }
        }
    }
}
