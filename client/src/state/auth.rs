//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthState>` context by `App`. Read by the route
//! guard, navbar and profile page; written by the session bootstrap, the
//! login flow, logout, and cross-tab `SessionEvent`s.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

use crate::net::types::User;

/// Where the client stands with respect to the persisted session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Bootstrap has not resolved yet; no redirect decisions are made.
    #[default]
    Loading,
    Anonymous,
    /// Restored from storage, server confirmation pending.
    Tentative(User),
    /// Confirmed by `auth/me` or established by a login in this session.
    Confirmed(User),
}

impl AuthState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Tentative(user) | Self::Confirmed(user) => Some(user),
            Self::Loading | Self::Anonymous => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Fold a session event published by another tab into this state.
    #[must_use]
    pub fn apply(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::LoggedIn { user } => Self::Confirmed(user),
            SessionEvent::LoggedOut => Self::Anonymous,
            SessionEvent::UserRefreshed { user } => match self {
                Self::Loading | Self::Anonymous => self,
                Self::Tentative(_) | Self::Confirmed(_) => Self::Confirmed(user),
            },
        }
    }
}

/// Cross-tab session message, serialized as `{"type": ..., "user": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    LoggedIn { user: User },
    LoggedOut,
    UserRefreshed { user: User },
}
