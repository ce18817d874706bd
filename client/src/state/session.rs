//! Session service: bootstrap, login, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionService` owns the three ports a session touches: the REST
//! client, the persisted key-value store and the cross-tab channel. Pages
//! build the browser flavor with `browser_session()` and feed the returned
//! `AuthState` into the shared signal.
//!
//! TRADE-OFFS
//! ==========
//! A network failure during bootstrap keeps the tentative user instead of
//! signing out, so an offline reload still renders the signed-in shell.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpClient;
use crate::net::types::{ResendVerificationRequest, User};
use crate::state::auth::{AuthState, SessionEvent};
use crate::util::broadcast::SessionChannel;
use crate::util::storage::{self, KeyValueStore};

/// Result of a successful credential exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session persisted; navigate to `redirect`.
    SignedIn { user: User, redirect: String },
    /// Account not yet verified; a fresh code was requested. No session.
    VerificationRequired { user_id: String, redirect: String },
}

#[must_use]
pub fn verify_email_path(user_id: &str) -> String {
    format!("/verify-email/{user_id}")
}

pub struct SessionService<H, S, C> {
    api: ApiClient<H>,
    store: S,
    channel: C,
}

impl<H: HttpClient, S: KeyValueStore, C: SessionChannel> SessionService<H, S, C> {
    pub fn new(api: ApiClient<H>, store: S, channel: C) -> Self {
        Self { api, store, channel }
    }

    pub fn api(&self) -> &ApiClient<H> {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Synchronous hydrate from storage; no network.
    pub fn restore(&self) -> AuthState {
        match storage::read_session(&self.store) {
            None => AuthState::Anonymous,
            Some(storage::StoredSession { user: Some(user), .. }) => AuthState::Tentative(user),
            Some(storage::StoredSession { user: None, .. }) => AuthState::Loading,
        }
    }

    /// Confirm the persisted token with `auth/me`. Exactly one call.
    ///
    /// If another tab replaced the stored token while the call was in flight,
    /// storage is left alone and the newer session is restored instead.
    pub async fn confirm(&self, tentative: AuthState) -> AuthState {
        let Some(session) = storage::read_session(&self.store) else {
            return AuthState::Anonymous;
        };
        let result = self.api.me(&session.token).await;
        if !self.holds_token(&session.token) {
            log::info!("stored session replaced during check, keeping the newer one");
            return self.restore();
        }
        match result {
            Ok(user) => {
                storage::write_user(&self.store, &user);
                if session.user.as_ref() != Some(&user) {
                    self.channel.publish(&SessionEvent::UserRefreshed { user: user.clone() });
                }
                AuthState::Confirmed(user)
            }
            Err(ApiError::Http { status, .. }) => {
                log::info!("stored session rejected ({status}), signing out");
                storage::clear_session(&self.store);
                AuthState::Anonymous
            }
            Err(ApiError::Network(e)) => {
                log::warn!("session check failed, keeping stored session: {e}");
                match tentative {
                    AuthState::Tentative(user) | AuthState::Confirmed(user) => AuthState::Tentative(user),
                    AuthState::Loading | AuthState::Anonymous => AuthState::Anonymous,
                }
            }
        }
    }

    fn holds_token(&self, token: &str) -> bool {
        storage::read_session(&self.store).is_some_and(|current| current.token == token)
    }

    /// Full start-up sequence: restore, then confirm when a token exists.
    pub async fn bootstrap(&self) -> AuthState {
        let restored = self.restore();
        if restored == AuthState::Anonymous {
            return restored;
        }
        self.confirm(restored).await
    }

    /// Exchange credentials for a session.
    ///
    /// Inactive accounts never get a persisted session; a verification code is
    /// requested and the caller is sent to the verify page instead.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when login fails, or when the follow-up resend for an
    /// inactive account fails.
    pub async fn login(&self, username: &str, password: &str, from: Option<&str>) -> Result<LoginOutcome, ApiError> {
        let resp = self.api.login(username, password).await?;
        if !resp.user.is_active {
            let user_id = resp.user.id;
            self.api
                .resend_verification(ResendVerificationRequest::ByUserId { user_id: &user_id })
                .await?;
            storage::remember_verification_user(&self.store, &user_id);
            let redirect = verify_email_path(&user_id);
            return Ok(LoginOutcome::VerificationRequired { user_id, redirect });
        }

        let token = resp.bearer().unwrap_or_default().to_owned();
        storage::write_session(&self.store, &token, &resp.user);
        self.channel.publish(&SessionEvent::LoggedIn { user: resp.user.clone() });
        log::info!("signed in as {}", resp.user.username);
        Ok(LoginOutcome::SignedIn { user: resp.user, redirect: crate::util::auth::return_target(from) })
    }

    /// Request a verification code for an inactive account found at the
    /// email step, remembering the returned user id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on failure, or `ApiError::Network` when the response
    /// carries no user id.
    pub async fn start_verification(&self, email: &str) -> Result<String, ApiError> {
        let resp = self
            .api
            .resend_verification(ResendVerificationRequest::ByEmail { email })
            .await?;
        let user_id = resp
            .user_id
            .ok_or_else(|| ApiError::Network("resend response missing user_id".to_owned()))?;
        storage::remember_verification_user(&self.store, &user_id);
        Ok(user_id)
    }

    /// Best-effort server logout, then clear local state and notify other tabs.
    pub async fn logout(&self) -> AuthState {
        if let Some(session) = storage::read_session(&self.store) {
            self.api.logout(&session.token).await;
        }
        storage::clear_session(&self.store);
        self.channel.publish(&SessionEvent::LoggedOut);
        AuthState::Anonymous
    }
}

#[cfg(feature = "hydrate")]
pub type BrowserSession =
    SessionService<crate::net::http::GlooHttp, storage::LocalStorage, crate::util::broadcast::BrowserChannel>;

/// Session service wired to `fetch`, `localStorage` and `BroadcastChannel`.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn browser_session() -> BrowserSession {
    SessionService::new(
        crate::net::api::browser_api(),
        storage::LocalStorage,
        crate::util::broadcast::BrowserChannel,
    )
}

/// Run the bootstrap and keep `auth` in sync with other tabs.
///
/// Called once from `App` after hydration.
#[cfg(feature = "hydrate")]
pub fn start(auth: leptos::prelude::RwSignal<AuthState>) {
    use leptos::prelude::*;

    crate::util::broadcast::subscribe(move |event| {
        auth.update(|state| *state = std::mem::take(state).apply(event));
    });

    leptos::task::spawn_local(async move {
        let session = browser_session();
        let restored = session.restore();
        auth.set(restored.clone());
        if restored == AuthState::Anonymous {
            return;
        }
        let confirmed = session.confirm(restored.clone()).await;
        // A login/logout from another tab may have landed meanwhile.
        if auth.get_untracked() == restored {
            auth.set(confirmed);
        }
    });
}
