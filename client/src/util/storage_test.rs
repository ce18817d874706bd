use super::*;

fn user() -> User {
    serde_json::from_value(serde_json::json!({
        "id": "u-1",
        "username": "sita",
        "email": "sita@example.com",
        "is_active": true
    }))
    .unwrap()
}

#[test]
fn read_session_requires_token() {
    let store = MemoryStore::default();
    save_json(&store, USER_KEY, &user());
    assert_eq!(read_session(&store), None);
}

#[test]
fn read_session_ignores_empty_token() {
    let store = MemoryStore::with(&[(TOKEN_KEY, "")]);
    assert_eq!(read_session(&store), None);
}

#[test]
fn write_then_read_session() {
    let store = MemoryStore::default();
    write_session(&store, "tok", &user());
    assert_eq!(read_session(&store), Some(StoredSession { token: "tok".to_owned(), user: Some(user()) }));
}

#[test]
fn corrupted_user_reads_as_token_only() {
    let store = MemoryStore::with(&[(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]);
    assert_eq!(read_session(&store), Some(StoredSession { token: "tok".to_owned(), user: None }));
}

#[test]
fn clear_session_keeps_verification_id() {
    let store = MemoryStore::default();
    write_session(&store, "tok", &user());
    remember_verification_user(&store, "u-9");
    clear_session(&store);
    assert!(!store.contains(TOKEN_KEY));
    assert!(!store.contains(USER_KEY));
    assert_eq!(store.get(VERIFICATION_USER_ID_KEY).as_deref(), Some("u-9"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_storage_is_inert_outside_browser() {
    let store = LocalStorage;
    store.set(TOKEN_KEY, "tok");
    assert_eq!(store.get(TOKEN_KEY), None);
    store.remove(TOKEN_KEY);
}
