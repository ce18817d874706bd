use super::*;

#[test]
fn no_hint_before_any_lookup() {
    assert_eq!(email_status_hint(EmailStatus::Unchecked), None);
}

#[test]
fn hints_cover_each_lookup_result() {
    assert_eq!(email_status_hint(EmailStatus::NotFound), Some("Email not found. Need an account?"));
    assert!(email_status_hint(EmailStatus::Checking).is_some());
    assert!(email_status_hint(EmailStatus::Found).is_some());
    assert!(email_status_hint(EmailStatus::Inactive).unwrap().contains("verification"));
}
