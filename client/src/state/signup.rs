//! Two-phase signup wizard: email, then password, then verification.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SignupPage` owns a `SignupWizard` signal. Step one only advances when the
//! backend positively reports the email as unused. Step two posts to
//! `signup/initial`; the returned user id is remembered for the verify page.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use crate::net::api::ApiClient;
use crate::net::http::HttpClient;
use crate::net::types::CheckEmailResponse;
use crate::state::login::INVALID_EMAIL_MESSAGE;
use crate::state::session::verify_email_path;
use crate::util::storage::{self, KeyValueStore};
use crate::util::validation::{PasswordChecks, is_valid_email};

pub const EMAIL_TAKEN_MESSAGE: &str = "This email is already registered. Please login instead.";
pub const AVAILABILITY_FAILED_MESSAGE: &str = "Could not verify email availability. Please try again.";
pub const WEAK_PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters and include uppercase, lowercase, number, and special character";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const SIGNUP_FAILED_MESSAGE: &str = "Registration failed. Please try again.";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Account created! Redirecting to verification page...";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SignupStep {
    #[default]
    EmailEntry,
    PasswordEntry,
    /// Initial signup accepted; waiting to redirect to verification.
    Submitted { user_id: String },
}

impl SignupStep {
    #[must_use]
    pub fn number(&self) -> usize {
        match self {
            Self::EmailEntry => 1,
            Self::PasswordEntry => 2,
            Self::Submitted { .. } => 3,
        }
    }
}

/// Live availability status shown under the email field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Unchecked,
    Checking,
    Available,
    Taken,
}

impl Availability {
    #[must_use]
    pub fn from_response(resp: &CheckEmailResponse) -> Self {
        if resp.exists == Some(false) { Self::Available } else { Self::Taken }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupWizard {
    step: SignupStep,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub availability: Availability,
}

impl SignupWizard {
    #[must_use]
    pub fn step(&self) -> &SignupStep {
        &self.step
    }

    /// # Errors
    ///
    /// Returns the inline message when the email is malformed.
    pub fn email_for_check(&self) -> Result<String, &'static str> {
        let email = self.email.trim();
        if is_valid_email(email) { Ok(email.to_owned()) } else { Err(INVALID_EMAIL_MESSAGE) }
    }

    /// Apply the explicit availability check. Advances only on
    /// `exists == false`.
    ///
    /// # Errors
    ///
    /// Returns the server message, or the "already registered" text.
    pub fn accept_email_check(&mut self, resp: &CheckEmailResponse) -> Result<(), String> {
        self.availability = Availability::from_response(resp);
        if self.availability == Availability::Available {
            self.step = SignupStep::PasswordEntry;
            Ok(())
        } else {
            Err(resp.message.clone().unwrap_or_else(|| EMAIL_TAKEN_MESSAGE.to_owned()))
        }
    }

    pub fn back(&mut self) {
        if self.step == SignupStep::PasswordEntry {
            self.step = SignupStep::EmailEntry;
        }
    }

    #[must_use]
    pub fn password_checks(&self) -> PasswordChecks {
        PasswordChecks::evaluate(&self.password)
    }

    /// # Errors
    ///
    /// Returns the inline message for a weak or mismatched password.
    pub fn validate_passwords(&self) -> Result<(), &'static str> {
        if !self.password_checks().is_strong() {
            return Err(WEAK_PASSWORD_MESSAGE);
        }
        if self.password != self.confirm_password {
            return Err(PASSWORD_MISMATCH_MESSAGE);
        }
        Ok(())
    }

    /// Record the accepted signup: passwords are wiped and the redirect
    /// target is returned.
    pub fn complete(&mut self, user_id: String) -> String {
        self.password.clear();
        self.confirm_password.clear();
        let redirect = verify_email_path(&user_id);
        self.step = SignupStep::Submitted { user_id };
        redirect
    }
}

/// Availability lookup for step one.
///
/// # Errors
///
/// Returns the user-facing alert text when the call fails.
pub async fn check_availability<H: HttpClient>(api: &ApiClient<H>, email: &str) -> Result<CheckEmailResponse, String> {
    api.check_email(email)
        .await
        .map_err(|e| e.user_message(AVAILABILITY_FAILED_MESSAGE))
}

/// `signup/initial`, remembering the returned user id for verification.
///
/// # Errors
///
/// Returns the user-facing alert text on failure or when no user id comes
/// back.
pub async fn register<H: HttpClient, S: KeyValueStore>(
    api: &ApiClient<H>,
    store: &S,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<String, String> {
    let resp = api
        .signup_initial(email, password, confirm_password)
        .await
        .map_err(|e| e.user_message(SIGNUP_FAILED_MESSAGE))?;
    let Some(user_id) = resp.user_id.filter(|id| !id.is_empty()) else {
        log::warn!("signup/initial succeeded without a user id");
        return Err(SIGNUP_FAILED_MESSAGE.to_owned());
    };
    storage::remember_verification_user(store, &user_id);
    log::info!("initial signup accepted for user {user_id}");
    Ok(user_id)
}

/// Legacy single-phase registration. Returns the server's message.
///
/// # Errors
///
/// Returns the user-facing alert text on failure.
pub async fn register_profile<H: HttpClient>(
    api: &ApiClient<H>,
    profile: &crate::net::types::SignupProfile,
) -> Result<String, String> {
    api.signup(profile)
        .await
        .map(|resp| resp.message.unwrap_or_else(|| "Registration successful!".to_owned()))
        .map_err(|e| e.user_message(SIGNUP_FAILED_MESSAGE))
}
