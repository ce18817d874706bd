use super::*;

fn user(name: &str) -> User {
    serde_json::from_value(serde_json::json!({
        "id": "u-1",
        "username": name,
        "email": "sita@example.com",
        "is_active": true
    }))
    .unwrap()
}

#[test]
fn default_state_is_loading() {
    assert!(AuthState::default().is_loading());
    assert_eq!(AuthState::default().user(), None);
}

#[test]
fn tentative_and_confirmed_count_as_authenticated() {
    assert!(AuthState::Tentative(user("a")).is_authenticated());
    assert!(AuthState::Confirmed(user("a")).is_authenticated());
    assert!(!AuthState::Anonymous.is_authenticated());
}

#[test]
fn logged_in_event_confirms_user() {
    let next = AuthState::Anonymous.apply(SessionEvent::LoggedIn { user: user("a") });
    assert_eq!(next, AuthState::Confirmed(user("a")));
}

#[test]
fn logged_out_event_clears_user() {
    let next = AuthState::Confirmed(user("a")).apply(SessionEvent::LoggedOut);
    assert_eq!(next, AuthState::Anonymous);
}

#[test]
fn user_refreshed_replaces_signed_in_user_only() {
    let next = AuthState::Tentative(user("old")).apply(SessionEvent::UserRefreshed { user: user("new") });
    assert_eq!(next, AuthState::Confirmed(user("new")));

    let next = AuthState::Anonymous.apply(SessionEvent::UserRefreshed { user: user("new") });
    assert_eq!(next, AuthState::Anonymous);
}

#[test]
fn session_event_wire_schema() {
    let raw = serde_json::to_value(SessionEvent::LoggedOut).unwrap();
    assert_eq!(raw, serde_json::json!({ "type": "logged_out" }));

    let raw = serde_json::to_value(SessionEvent::LoggedIn { user: user("a") }).unwrap();
    assert_eq!(raw["type"], "logged_in");
    assert_eq!(raw["user"]["username"], "a");

    let parsed: SessionEvent = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed, SessionEvent::LoggedIn { user: user("a") });
}
