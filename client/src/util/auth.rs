//! Route guard decisions shared by the page shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthGuard` wraps the routes and applies these rules after every auth or
//! location change. The guard is advisory; the backend enforces access.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Pages only meaningful while signed out.
const AUTH_ONLY_PATHS: &[&str] = &["/login", "/signup"];
const PUBLIC_PATHS: &[&str] = &["/", "/works", "/freelancers", "/forgot-password"];
const PUBLIC_PREFIXES: &[&str] = &["/verify-email", "/complete-profile"];
const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/profile", "/settings", "/projects"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathClass {
    AuthOnly,
    Public,
    Protected,
    /// Not a known route; left to the not-found page.
    Unknown,
}

#[must_use]
pub fn classify_path(path: &str) -> PathClass {
    let path = normalize_path(path);
    if AUTH_ONLY_PATHS.contains(&path) {
        PathClass::AuthOnly
    } else if PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::Public
    } else if PROTECTED_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::Protected
    } else {
        PathClass::Unknown
    }
}

fn normalize_path(path: &str) -> &str {
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth is still resolving; render the placeholder.
    Wait,
    Render,
    Redirect(String),
}

/// Decide what the guard does for `path` given the current auth state.
/// `from` is the raw `from` query parameter, if any.
#[must_use]
pub fn guard_decision(state: &AuthState, path: &str, from: Option<&str>) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Wait;
    }
    match (classify_path(path), state.is_authenticated()) {
        (PathClass::AuthOnly, true) => GuardDecision::Redirect(return_target(from)),
        (PathClass::Protected, false) => GuardDecision::Redirect(login_redirect(path)),
        _ => GuardDecision::Render,
    }
}

/// `/login?from=<path>` for a protected path visited while signed out.
#[must_use]
pub fn login_redirect(path: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("from", path)
        .finish();
    format!("/login?{query}")
}

/// Post-login destination: `from` when it is a same-origin path, else `/`.
#[must_use]
pub fn return_target(from: Option<&str>) -> String {
    match from {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && classify_path(path) != PathClass::AuthOnly =>
        {
            path.to_owned()
        }
        _ => "/".to_owned(),
    }
}

/// Ensures each distinct redirect is issued once while the decision holds.
#[derive(Clone, Debug, Default)]
pub struct RedirectLatch {
    last: Option<String>,
}

impl RedirectLatch {
    /// Returns the target to navigate to, or `None` if nothing new to do.
    pub fn fire(&mut self, decision: &GuardDecision) -> Option<String> {
        match decision {
            GuardDecision::Redirect(target) if self.last.as_ref() != Some(target) => {
                self.last = Some(target.clone());
                Some(target.clone())
            }
            GuardDecision::Redirect(_) => None,
            GuardDecision::Wait | GuardDecision::Render => {
                self.last = None;
                None
            }
        }
    }
}

/// Re-evaluate the guard whenever auth or location changes and navigate on
/// new redirect decisions.
pub fn install_auth_guard<F>(auth: RwSignal<AuthState>, path: Memo<String>, from: Memo<Option<String>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let latch = StoredValue::new(RedirectLatch::default());
    Effect::new(move || {
        let state = auth.get();
        let path = path.get();
        let decision = guard_decision(&state, &path, from.get().as_deref());
        if let Some(target) = latch.try_update_value(|l| l.fire(&decision)).flatten() {
            log::debug!("route guard redirecting {path} -> {target}");
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Navigate whenever `pending` is filled, then clear it. Lets async handlers
/// request navigation by writing a signal.
pub fn install_pending_redirect<F>(pending: RwSignal<Option<String>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if let Some(target) = pending.get() {
            pending.set(None);
            navigate(&target, NavigateOptions::default());
        }
    });
}
