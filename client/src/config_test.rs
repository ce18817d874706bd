use super::*;

#[test]
fn resolve_api_url_defaults_when_unset() {
    assert_eq!(resolve_api_url(None), DEFAULT_API_URL);
    assert_eq!(resolve_api_url(Some("   ")), DEFAULT_API_URL);
}

#[test]
fn resolve_api_url_trims_trailing_slash() {
    assert_eq!(resolve_api_url(Some("https://api.lanceraa.com/")), "https://api.lanceraa.com");
}

#[test]
fn api_base_url_has_no_trailing_slash() {
    assert!(!api_base_url().ends_with('/'));
}
