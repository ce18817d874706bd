use futures::executor::block_on;

use super::*;
use crate::net::http::mock::MockHttp;
use crate::util::broadcast::RecordingChannel;
use crate::util::storage::{MemoryStore, TOKEN_KEY, USER_KEY, VERIFICATION_USER_ID_KEY};

const BASE: &str = "http://api.test";

fn user_json(active: bool) -> serde_json::Value {
    serde_json::json!({
        "id": "u-1",
        "username": "sita",
        "email": "sita@example.com",
        "is_active": active
    })
}

fn user(active: bool) -> User {
    serde_json::from_value(user_json(active)).unwrap()
}

fn service(http: MockHttp, store: MemoryStore) -> SessionService<MockHttp, MemoryStore, RecordingChannel> {
    SessionService::new(ApiClient::new(http, BASE), store, RecordingChannel::default())
}

fn signed_in_store() -> MemoryStore {
    let store = MemoryStore::default();
    storage::write_session(&store, "tok", &user(true));
    store
}

// =============================================================
// Bootstrap
// =============================================================

#[test]
fn restore_without_token_is_anonymous() {
    let svc = service(MockHttp::new(), MemoryStore::default());
    assert_eq!(svc.restore(), AuthState::Anonymous);
}

#[test]
fn restore_with_stored_user_is_tentative() {
    let svc = service(MockHttp::new(), signed_in_store());
    assert_eq!(svc.restore(), AuthState::Tentative(user(true)));
}

#[test]
fn restore_with_token_only_waits_for_server() {
    let svc = service(MockHttp::new(), MemoryStore::with(&[(TOKEN_KEY, "tok")]));
    assert_eq!(svc.restore(), AuthState::Loading);
}

#[test]
fn bootstrap_without_token_makes_no_call() {
    let svc = service(MockHttp::new(), MemoryStore::default());
    assert_eq!(block_on(svc.bootstrap()), AuthState::Anonymous);
    assert!(svc.api().http().requests().is_empty());
}

#[test]
fn bootstrap_success_overwrites_stored_user() {
    let mut fresh = user_json(true);
    fresh["full_name"] = serde_json::json!("Sita Sharma");
    let svc = service(MockHttp::new().reply(200, serde_json::json!({ "user": fresh })), signed_in_store());

    let state = block_on(svc.bootstrap());
    let AuthState::Confirmed(confirmed) = state else {
        panic!("expected confirmed");
    };
    assert_eq!(confirmed.full_name.as_deref(), Some("Sita Sharma"));
    let stored = storage::read_session(svc.store()).unwrap();
    assert_eq!(stored.user, Some(confirmed.clone()));
    assert_eq!(svc.api().http().requests().len(), 1);
    assert_eq!(svc.channel.events(), vec![SessionEvent::UserRefreshed { user: confirmed }]);
}

#[test]
fn bootstrap_unchanged_user_publishes_nothing() {
    let svc = service(MockHttp::new().reply(200, serde_json::json!({ "user": user_json(true) })), signed_in_store());
    assert_eq!(block_on(svc.bootstrap()), AuthState::Confirmed(user(true)));
    assert!(svc.channel.events().is_empty());
}

#[test]
fn bootstrap_rejected_token_clears_storage() {
    let svc = service(MockHttp::new().reply(401, serde_json::json!({ "detail": "expired" })), signed_in_store());
    assert_eq!(block_on(svc.bootstrap()), AuthState::Anonymous);
    assert!(!svc.store().contains(TOKEN_KEY));
    assert!(!svc.store().contains(USER_KEY));
}

#[test]
fn bootstrap_network_error_keeps_tentative_user() {
    let svc = service(MockHttp::new().fail("offline"), signed_in_store());
    assert_eq!(block_on(svc.bootstrap()), AuthState::Tentative(user(true)));
    assert!(svc.store().contains(TOKEN_KEY));
}

#[test]
fn bootstrap_network_error_without_user_is_anonymous_but_keeps_token() {
    let svc = service(MockHttp::new().fail("offline"), MemoryStore::with(&[(TOKEN_KEY, "tok")]));
    assert_eq!(block_on(svc.bootstrap()), AuthState::Anonymous);
    assert!(svc.store().contains(TOKEN_KEY));
}

/// Another tab signs in right after this tab reads its token.
struct ReplacedMidCheck {
    inner: MemoryStore,
    swapped: std::cell::Cell<bool>,
}

impl KeyValueStore for ReplacedMidCheck {
    fn get(&self, key: &str) -> Option<String> {
        let value = self.inner.get(key);
        if key == TOKEN_KEY && !self.swapped.replace(true) {
            let mut other = user(true);
            other.username = "ram".to_owned();
            storage::write_session(&self.inner, "tok-2", &other);
        }
        value
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.set(key, value);
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

#[test]
fn rejected_token_does_not_clear_session_written_by_another_tab() {
    let store = ReplacedMidCheck { inner: signed_in_store(), swapped: std::cell::Cell::new(false) };
    let svc = SessionService::new(
        ApiClient::new(MockHttp::new().reply(401, serde_json::json!({ "detail": "expired" })), BASE),
        store,
        RecordingChannel::default(),
    );

    let state = block_on(svc.confirm(AuthState::Tentative(user(true))));

    assert_eq!(svc.store().inner.get(TOKEN_KEY).as_deref(), Some("tok-2"));
    assert!(matches!(state, AuthState::Tentative(u) if u.username == "ram"));
    assert!(svc.channel.events().is_empty());
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_active_user_persists_session() {
    let svc = service(
        MockHttp::new().reply(200, serde_json::json!({ "token": { "access_token": "tok" }, "user": user_json(true) })),
        MemoryStore::default(),
    );
    let outcome = block_on(svc.login("sita@example.com", "Abc123!@", None)).unwrap();
    assert_eq!(outcome, LoginOutcome::SignedIn { user: user(true), redirect: "/".to_owned() });
    assert_eq!(svc.store().get(TOKEN_KEY).as_deref(), Some("tok"));
    assert_eq!(svc.channel.events(), vec![SessionEvent::LoggedIn { user: user(true) }]);
}

#[test]
fn login_honors_from_parameter() {
    let svc = service(
        MockHttp::new().reply(200, serde_json::json!({ "token": { "access_token": "tok" }, "user": user_json(true) })),
        MemoryStore::default(),
    );
    let outcome = block_on(svc.login("sita@example.com", "pw", Some("/profile"))).unwrap();
    assert!(matches!(outcome, LoginOutcome::SignedIn { redirect, .. } if redirect == "/profile"));
}

#[test]
fn guard_on_login_page_lands_where_login_outcome_points() {
    use crate::util::auth::{GuardDecision, guard_decision};

    for from in [Some("/profile"), None] {
        let svc = service(
            MockHttp::new().reply(200, serde_json::json!({ "token": { "access_token": "tok" }, "user": user_json(true) })),
            MemoryStore::default(),
        );
        let Ok(LoginOutcome::SignedIn { user, redirect }) = block_on(svc.login("sita@example.com", "pw", from)) else {
            panic!("expected sign-in");
        };
        let decision = guard_decision(&AuthState::Confirmed(user), "/login", from);
        assert_eq!(decision, GuardDecision::Redirect(redirect));
    }
}

#[test]
fn login_inactive_user_resends_and_never_persists() {
    let svc = service(
        MockHttp::new()
            .reply(200, serde_json::json!({ "token": { "access_token": "tok" }, "user": user_json(false) }))
            .reply(200, serde_json::json!({ "user_id": "u-1" })),
        MemoryStore::default(),
    );
    let outcome = block_on(svc.login("sita@example.com", "pw", None)).unwrap();
    assert_eq!(
        outcome,
        LoginOutcome::VerificationRequired { user_id: "u-1".to_owned(), redirect: "/verify-email/u-1".to_owned() }
    );
    assert_eq!(
        svc.api().http().urls(),
        vec![
            "http://api.test/api/auth/login".to_owned(),
            "http://api.test/api/auth/resend-verification".to_owned(),
        ]
    );
    assert_eq!(
        svc.api().http().requests()[1].body,
        crate::net::http::RequestBody::Json(serde_json::json!({ "user_id": "u-1" }))
    );
    assert!(!svc.store().contains(TOKEN_KEY));
    assert!(!svc.store().contains(USER_KEY));
    assert_eq!(svc.store().get(VERIFICATION_USER_ID_KEY).as_deref(), Some("u-1"));
    assert!(svc.channel.events().is_empty());
}

#[test]
fn login_inactive_user_with_failed_resend_is_error() {
    let svc = service(
        MockHttp::new()
            .reply(200, serde_json::json!({ "user": user_json(false) }))
            .reply(500, serde_json::json!({})),
        MemoryStore::default(),
    );
    assert!(block_on(svc.login("a@b.co", "pw", None)).is_err());
    assert!(!svc.store().contains(TOKEN_KEY));
}

#[test]
fn login_failure_surfaces_detail_and_persists_nothing() {
    let svc = service(
        MockHttp::new().reply(401, serde_json::json!({ "detail": "Incorrect password" })),
        MemoryStore::default(),
    );
    let err = block_on(svc.login("a@b.co", "pw", None)).unwrap_err();
    assert_eq!(err.user_message("Login failed."), "Incorrect password");
    assert!(!svc.store().contains(TOKEN_KEY));
}

// =============================================================
// Verification start + logout
// =============================================================

#[test]
fn start_verification_remembers_user_id() {
    let svc = service(MockHttp::new().reply(200, serde_json::json!({ "user_id": 9 })), MemoryStore::default());
    assert_eq!(block_on(svc.start_verification("a@b.co")), Ok("9".to_owned()));
    assert_eq!(svc.store().get(VERIFICATION_USER_ID_KEY).as_deref(), Some("9"));
}

#[test]
fn start_verification_requires_user_id() {
    let svc = service(MockHttp::new().reply(200, serde_json::json!({})), MemoryStore::default());
    assert!(matches!(block_on(svc.start_verification("a@b.co")), Err(ApiError::Network(_))));
}

#[test]
fn logout_clears_even_when_server_fails() {
    let svc = service(MockHttp::new().fail("offline"), signed_in_store());
    assert_eq!(block_on(svc.logout()), AuthState::Anonymous);
    assert!(!svc.store().contains(TOKEN_KEY));
    assert_eq!(svc.channel.events(), vec![SessionEvent::LoggedOut]);
    assert_eq!(svc.api().http().requests()[0].bearer.as_deref(), Some("tok"));
}

#[test]
fn logout_without_session_skips_server_call() {
    let svc = service(MockHttp::new(), MemoryStore::default());
    block_on(svc.logout());
    assert!(svc.api().http().requests().is_empty());
}
