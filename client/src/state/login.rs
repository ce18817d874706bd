//! Two-step login wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `LoginPage` keeps a `LoginWizard` in a signal. Step one looks the email up
//! with `check-email`; inactive accounts are diverted to verification before
//! a password is ever asked for. Step two hands the credentials to
//! `SessionService::login`.
//!
//! DESIGN
//! ======
//! The step is an enum so "password visible but email unchecked" cannot be
//! represented. Async helpers take owned inputs and return outcomes; the page
//! applies them to the wizard after the await.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::api::ApiError;
use crate::net::http::HttpClient;
use crate::net::types::CheckEmailResponse;
use crate::state::session::{SessionService, verify_email_path};
use crate::util::broadcast::SessionChannel;
use crate::util::storage::KeyValueStore;
use crate::util::validation::is_valid_email;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const EMAIL_NOT_FOUND_MESSAGE: &str = "Email not found. Please check your email or sign up.";
pub const EMAIL_CHECK_FAILED_MESSAGE: &str = "Could not verify email. Please try again.";
pub const NEEDS_VERIFICATION_MESSAGE: &str = "Your account needs verification. Redirecting to verification page...";
pub const START_VERIFICATION_FAILED_MESSAGE: &str = "Failed to start verification process. Please try again.";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Enter your email and password.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginStep {
    #[default]
    EmailEntry,
    PasswordEntry,
}

impl LoginStep {
    /// 1-based index for the step indicator.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            Self::EmailEntry => 1,
            Self::PasswordEntry => 2,
        }
    }
}

/// Live lookup status shown under the email field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmailStatus {
    #[default]
    Unchecked,
    Checking,
    NotFound,
    Found,
    /// Registered but not yet verified.
    Inactive,
}

impl EmailStatus {
    /// `exists` missing is treated like an unknown email.
    #[must_use]
    pub fn from_response(resp: &CheckEmailResponse) -> Self {
        match (resp.exists, resp.is_active) {
            (Some(true), Some(false)) => Self::Inactive,
            (Some(true), _) => Self::Found,
            (Some(false) | None, _) => Self::NotFound,
        }
    }
}

/// Result of the explicit step-one check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmailStepResult {
    /// Active account; show the password step.
    Password,
    NotFound,
    /// Inactive account; a code was sent and the page should redirect.
    Verify { user_id: String, redirect: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginWizard {
    step: LoginStep,
    pub email: String,
    pub password: String,
    pub status: EmailStatus,
}

impl LoginWizard {
    #[must_use]
    pub fn step(&self) -> LoginStep {
        self.step
    }

    /// Trimmed email ready for `check-email`.
    ///
    /// # Errors
    ///
    /// Returns the inline message when the email is malformed.
    pub fn email_for_check(&self) -> Result<String, &'static str> {
        let email = self.email.trim();
        if is_valid_email(email) { Ok(email.to_owned()) } else { Err(INVALID_EMAIL_MESSAGE) }
    }

    /// Record the step-one result. Only `Password` advances the wizard.
    pub fn apply_email_step(&mut self, result: &EmailStepResult) {
        match result {
            EmailStepResult::Password => {
                self.status = EmailStatus::Found;
                self.step = LoginStep::PasswordEntry;
            }
            EmailStepResult::NotFound => self.status = EmailStatus::NotFound,
            EmailStepResult::Verify { .. } => self.status = EmailStatus::Inactive,
        }
    }

    /// Back to step one; the email survives, the password does not.
    pub fn back(&mut self) {
        self.step = LoginStep::EmailEntry;
        self.password.clear();
    }

    /// Credentials for `login`, both required.
    ///
    /// # Errors
    ///
    /// Returns the inline message when either field is blank.
    pub fn credentials(&self) -> Result<(String, String), &'static str> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(MISSING_CREDENTIALS_MESSAGE);
        }
        Ok((email.to_owned(), self.password.clone()))
    }
}

/// Explicit step-one check. For an inactive account this also requests a
/// verification code by email before reporting `Verify`.
///
/// # Errors
///
/// Returns the user-facing alert text when either call fails.
pub async fn check_email_step<H, S, C>(session: &SessionService<H, S, C>, email: &str) -> Result<EmailStepResult, String>
where
    H: HttpClient,
    S: KeyValueStore,
    C: SessionChannel,
{
    let resp = session
        .api()
        .check_email(email)
        .await
        .map_err(|e| e.user_message(EMAIL_CHECK_FAILED_MESSAGE))?;
    match EmailStatus::from_response(&resp) {
        EmailStatus::Found => Ok(EmailStepResult::Password),
        EmailStatus::Inactive => {
            let user_id = session.start_verification(email).await.map_err(|e| match e {
                ApiError::Http { .. } => START_VERIFICATION_FAILED_MESSAGE.to_owned(),
                ApiError::Network(_) => e.user_message(START_VERIFICATION_FAILED_MESSAGE),
            })?;
            let redirect = verify_email_path(&user_id);
            Ok(EmailStepResult::Verify { user_id, redirect })
        }
        EmailStatus::NotFound | EmailStatus::Unchecked | EmailStatus::Checking => Ok(EmailStepResult::NotFound),
    }
}
