//! Build-time client configuration and UI timing constants.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Delay before a typed email is checked against the backend.
pub const EMAIL_CHECK_DEBOUNCE_MS: u32 = 500;
/// Client-side cooldown between verification-code resends.
pub const RESEND_COOLDOWN_SECS: u64 = 30;
/// Pause on a success/warning alert before navigating away.
pub const REDIRECT_DELAY_MS: u32 = 2000;

/// Backend base URL, baked in from `LANCERAA_API_URL` at compile time.
#[must_use]
pub fn api_base_url() -> String {
    resolve_api_url(option_env!("LANCERAA_API_URL"))
}

fn resolve_api_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_owned()
}
