use futures::executor::block_on;

use super::*;
use crate::net::http::mock::MockHttp;
use crate::net::http::{Method, RequestBody, encode_form};

const BASE: &str = "http://api.test";

fn user_json(active: bool) -> serde_json::Value {
    serde_json::json!({
        "id": "u-1",
        "username": "sita",
        "email": "sita@example.com",
        "is_active": active
    })
}

#[test]
fn endpoint_joins_base_and_path() {
    assert_eq!(endpoint("http://api.test/", "check-email"), "http://api.test/api/auth/check-email");
    assert_eq!(endpoint("http://api.test", "/signup/initial"), "http://api.test/api/auth/signup/initial");
}

#[test]
fn user_message_uses_detail_verbatim() {
    let err = ApiError::Http { status: 400, detail: Some("Incorrect password".to_owned()), error_code: None };
    assert_eq!(err.user_message("fallback"), "Incorrect password");
}

#[test]
fn user_message_falls_back_without_detail() {
    let err = ApiError::Http { status: 500, detail: None, error_code: None };
    assert_eq!(err.user_message("Login failed."), "Login failed.");
}

#[test]
fn user_message_network_is_fixed_text() {
    let err = ApiError::Network("boom".to_owned());
    assert_eq!(err.user_message("ignored"), NETWORK_ERROR_MESSAGE);
    assert_eq!(err.status(), None);
}

#[test]
fn check_email_posts_json_body() {
    let api = ApiClient::new(MockHttp::new().reply(200, serde_json::json!({ "exists": false })), BASE);
    let resp = block_on(api.check_email("a@b.co")).unwrap();
    assert_eq!(resp.exists, Some(false));

    let reqs = api.http().requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, Method::Post);
    assert_eq!(reqs[0].url, "http://api.test/api/auth/check-email");
    assert_eq!(reqs[0].body, RequestBody::Json(serde_json::json!({ "email": "a@b.co" })));
}

#[test]
fn login_sends_form_encoded_credentials() {
    let api = ApiClient::new(
        MockHttp::new().reply(
            200,
            serde_json::json!({ "token": { "access_token": "tok" }, "user": user_json(true) }),
        ),
        BASE,
    );
    let resp = block_on(api.login("sita@example.com", "p&ss word")).unwrap();
    assert_eq!(resp.bearer(), Some("tok"));

    let reqs = api.http().requests();
    let RequestBody::Form(pairs) = &reqs[0].body else {
        panic!("expected form body");
    };
    assert_eq!(encode_form(pairs), "username=sita%40example.com&password=p%26ss+word");
}

#[test]
fn login_http_error_keeps_server_detail() {
    let api = ApiClient::new(MockHttp::new().reply(401, serde_json::json!({ "detail": "Incorrect email or password" })), BASE);
    let err = block_on(api.login("a@b.co", "x")).unwrap_err();
    assert_eq!(
        err,
        ApiError::Http { status: 401, detail: Some("Incorrect email or password".to_owned()), error_code: None }
    );
}

#[test]
fn login_malformed_json_is_network_error() {
    let api = ApiClient::new(MockHttp::new().reply_raw(200, "<html>oops</html>"), BASE);
    let err = block_on(api.login("a@b.co", "x")).unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn login_active_user_without_token_is_rejected() {
    let api = ApiClient::new(MockHttp::new().reply(200, serde_json::json!({ "user": user_json(true) })), BASE);
    assert!(matches!(block_on(api.login("a@b.co", "x")), Err(ApiError::Network(_))));
}

#[test]
fn login_inactive_user_without_token_is_accepted() {
    let api = ApiClient::new(MockHttp::new().reply(200, serde_json::json!({ "user": user_json(false) })), BASE);
    let resp = block_on(api.login("a@b.co", "x")).unwrap();
    assert!(!resp.user.is_active);
}

#[test]
fn transport_failure_is_network_error() {
    let api = ApiClient::new(MockHttp::new().fail("offline"), BASE);
    assert!(matches!(block_on(api.check_email("a@b.co")), Err(ApiError::Network(_))));
}

#[test]
fn verify_email_surfaces_error_code_header() {
    let api = ApiClient::new(
        MockHttp::new().reply_with_headers(
            400,
            &[("X-Error-Code", "EXPIRED_CODE")],
            serde_json::json!({ "detail": "Code expired" }),
        ),
        BASE,
    );
    let err = block_on(api.verify_email("u-1", "123456")).unwrap_err();
    let ApiError::Http { error_code, .. } = err else {
        panic!("expected http error");
    };
    assert_eq!(error_code.as_deref(), Some("EXPIRED_CODE"));
}

#[test]
fn verify_email_ignores_success_body() {
    let api = ApiClient::new(MockHttp::new().reply_raw(200, ""), BASE);
    assert_eq!(block_on(api.verify_email("u-1", "123456")), Ok(()));
    assert_eq!(
        api.http().requests()[0].body,
        RequestBody::Json(serde_json::json!({ "user_id": "u-1", "verification_code": "123456" }))
    );
}

#[test]
fn me_sends_bearer_token() {
    let api = ApiClient::new(MockHttp::new().reply(200, serde_json::json!({ "user": user_json(true) })), BASE);
    let user = block_on(api.me("tok")).unwrap();
    assert_eq!(user.username, "sita");
    let reqs = api.http().requests();
    assert_eq!(reqs[0].method, Method::Get);
    assert_eq!(reqs[0].bearer.as_deref(), Some("tok"));
}

#[test]
fn logout_swallows_failures() {
    let api = ApiClient::new(MockHttp::new().fail("offline"), BASE);
    block_on(api.logout("tok"));
    assert_eq!(api.http().urls(), vec!["http://api.test/api/auth/logout".to_owned()]);
}
