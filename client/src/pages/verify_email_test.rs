use super::*;

#[test]
fn countdown_takes_priority() {
    assert_eq!(resend_label(12, true), "Resend code in 12s");
    assert_eq!(resend_label(1, false), "Resend code in 1s");
}

#[test]
fn idle_and_sending_labels() {
    assert_eq!(resend_label(0, true), "Sending...");
    assert_eq!(resend_label(0, false), "Didn't receive code? Resend");
}
