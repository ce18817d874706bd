//! Wire DTOs for the Lanceraa REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's snake_case JSON. Optional fields default
//! to `None` so partial payloads from older endpoints still deserialize.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// An account as returned by `login` and `auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier. Accepts a JSON string or integer.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// Display name when the backend composes one.
    #[serde(default, alias = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// `false` until the email address has been verified.
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_completed: Option<bool>,
}

/// Account status shown on the profile page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    PendingVerification,
}

impl AccountStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::PendingVerification => "Pending Verification",
        }
    }
}

impl User {
    /// Full name, else first + last name, else the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return full.to_owned();
        }
        let composed = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let composed = composed.trim();
        if composed.is_empty() {
            self.username.clone()
        } else {
            composed.to_owned()
        }
    }

    /// Single uppercase initial for the navbar avatar, `?` when nothing is known.
    #[must_use]
    pub fn initials(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map_or_else(|| "?".to_owned(), |c| c.to_uppercase().collect())
    }

    #[must_use]
    pub fn account_status(&self) -> AccountStatus {
        if self.is_active {
            AccountStatus::Active
        } else {
            AccountStatus::PendingVerification
        }
    }

    /// True unless the backend has marked the profile as completed.
    #[must_use]
    pub fn needs_profile(&self) -> bool {
        !self.profile_completed.unwrap_or(false)
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckEmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InitialSignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Body for `resend-verification`: the verify page knows the user id, the
/// login page only knows the email.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResendVerificationRequest<'a> {
    ByUserId { user_id: &'a str },
    ByEmail { email: &'a str },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyEmailRequest<'a> {
    pub user_id: &'a str,
    pub verification_code: &'a str,
}

/// Full-profile body for the single-phase `signup` endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    pub address: Address,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Freelancer,
    Client,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Address {
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
    pub zip: String,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CheckEmailResponse {
    /// `None` when the backend omitted the flag; callers treat that as "unknown".
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Access token as nested by the OAuth2 password-grant endpoint, or a bare
/// string from older backends.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TokenPayload {
    Bearer {
        access_token: String,
        #[serde(default)]
        token_type: Option<String>,
    },
    Raw(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<TokenPayload>,
    #[serde(default)]
    pub access_token: Option<String>,
    pub user: User,
}

impl LoginResponse {
    /// Bearer string from whichever token shape the backend returned.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        match &self.token {
            Some(TokenPayload::Bearer { access_token, .. }) => Some(access_token.as_str()),
            Some(TokenPayload::Raw(raw)) => Some(raw.as_str()),
            None => self.access_token.as_deref(),
        }
        .filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InitialSignupResponse {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<SignupUser>,
}

/// User echo from the single-phase signup endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignupUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResendVerificationResponse {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

/// Error body shape shared by the backend's failure responses.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// First human-readable message in `detail`, `error`, `message` order.
    ///
    /// `detail` may be a validation array; only string details are surfaced.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        let detail = match self.detail {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        };
        detail
            .or(self.error)
            .or(self.message)
            .filter(|s| !s.trim().is_empty())
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    id_from_value(value).ok_or_else(|| D::Error::custom("expected string or integer id"))
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => id_from_value(v)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected string or integer id")),
    }
}

fn id_from_value(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}
