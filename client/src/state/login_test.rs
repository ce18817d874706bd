use futures::executor::block_on;

use super::*;
use crate::net::api::ApiClient;
use crate::net::http::mock::MockHttp;
use crate::util::broadcast::RecordingChannel;
use crate::util::storage::{KeyValueStore, MemoryStore, VERIFICATION_USER_ID_KEY};

fn check(exists: Option<bool>, is_active: Option<bool>) -> CheckEmailResponse {
    CheckEmailResponse { exists, is_active, message: None }
}

fn session(http: MockHttp) -> SessionService<MockHttp, MemoryStore, RecordingChannel> {
    SessionService::new(ApiClient::new(http, "http://api.test"), MemoryStore::default(), RecordingChannel::default())
}

// =============================================================
// Status mapping
// =============================================================

#[test]
fn status_from_check_response() {
    assert_eq!(EmailStatus::from_response(&check(Some(true), Some(true))), EmailStatus::Found);
    assert_eq!(EmailStatus::from_response(&check(Some(true), None)), EmailStatus::Found);
    assert_eq!(EmailStatus::from_response(&check(Some(true), Some(false))), EmailStatus::Inactive);
    assert_eq!(EmailStatus::from_response(&check(Some(false), None)), EmailStatus::NotFound);
    assert_eq!(EmailStatus::from_response(&check(None, None)), EmailStatus::NotFound);
}

// =============================================================
// Wizard transitions
// =============================================================

#[test]
fn email_for_check_trims_and_validates() {
    let mut wizard = LoginWizard { email: "  sita@example.com ".to_owned(), ..LoginWizard::default() };
    assert_eq!(wizard.email_for_check(), Ok("sita@example.com".to_owned()));
    wizard.email = "sita@example".to_owned();
    assert_eq!(wizard.email_for_check(), Err(INVALID_EMAIL_MESSAGE));
}

#[test]
fn only_found_advances_to_password() {
    let mut wizard = LoginWizard::default();
    wizard.apply_email_step(&EmailStepResult::NotFound);
    assert_eq!(wizard.step(), LoginStep::EmailEntry);
    wizard.apply_email_step(&EmailStepResult::Verify { user_id: "1".to_owned(), redirect: "/verify-email/1".to_owned() });
    assert_eq!(wizard.step(), LoginStep::EmailEntry);
    assert_eq!(wizard.status, EmailStatus::Inactive);
    wizard.apply_email_step(&EmailStepResult::Password);
    assert_eq!(wizard.step(), LoginStep::PasswordEntry);
}

#[test]
fn back_keeps_email_and_drops_password() {
    let mut wizard = LoginWizard { email: "a@b.co".to_owned(), ..LoginWizard::default() };
    wizard.apply_email_step(&EmailStepResult::Password);
    wizard.password = "secret".to_owned();
    wizard.back();
    assert_eq!(wizard.step(), LoginStep::EmailEntry);
    assert_eq!(wizard.email, "a@b.co");
    assert!(wizard.password.is_empty());
}

#[test]
fn credentials_require_both_fields() {
    let mut wizard = LoginWizard { email: "a@b.co".to_owned(), ..LoginWizard::default() };
    assert_eq!(wizard.credentials(), Err(MISSING_CREDENTIALS_MESSAGE));
    wizard.password = "pw".to_owned();
    assert_eq!(wizard.credentials(), Ok(("a@b.co".to_owned(), "pw".to_owned())));
}

// =============================================================
// Step-one check
// =============================================================

#[test]
fn active_email_goes_to_password() {
    let svc = session(MockHttp::new().reply(200, serde_json::json!({ "exists": true, "is_active": true })));
    assert_eq!(block_on(check_email_step(&svc, "a@b.co")), Ok(EmailStepResult::Password));
    assert_eq!(svc.api().http().requests().len(), 1);
}

#[test]
fn unknown_email_stays() {
    let svc = session(MockHttp::new().reply(200, serde_json::json!({ "exists": false })));
    assert_eq!(block_on(check_email_step(&svc, "a@b.co")), Ok(EmailStepResult::NotFound));
}

#[test]
fn inactive_email_sends_code_by_email() {
    let svc = session(
        MockHttp::new()
            .reply(200, serde_json::json!({ "exists": true, "is_active": false }))
            .reply(200, serde_json::json!({ "user_id": "u-7" })),
    );
    let result = block_on(check_email_step(&svc, "a@b.co")).unwrap();
    assert_eq!(result, EmailStepResult::Verify { user_id: "u-7".to_owned(), redirect: "/verify-email/u-7".to_owned() });
    assert_eq!(
        svc.api().http().requests()[1].body,
        crate::net::http::RequestBody::Json(serde_json::json!({ "email": "a@b.co" }))
    );
    assert_eq!(svc.store().get(VERIFICATION_USER_ID_KEY).as_deref(), Some("u-7"));
}

#[test]
fn inactive_email_with_failed_resend_reports_error() {
    let svc = session(
        MockHttp::new()
            .reply(200, serde_json::json!({ "exists": true, "is_active": false }))
            .reply(500, serde_json::json!({ "detail": "boom" })),
    );
    assert_eq!(block_on(check_email_step(&svc, "a@b.co")), Err(START_VERIFICATION_FAILED_MESSAGE.to_owned()));
}

#[test]
fn check_failure_uses_detail_then_fallback() {
    let svc = session(MockHttp::new().reply(429, serde_json::json!({ "detail": "Slow down" })));
    assert_eq!(block_on(check_email_step(&svc, "a@b.co")), Err("Slow down".to_owned()));

    let svc = session(MockHttp::new().reply(500, serde_json::json!({})));
    assert_eq!(block_on(check_email_step(&svc, "a@b.co")), Err(EMAIL_CHECK_FAILED_MESSAGE.to_owned()));
}
