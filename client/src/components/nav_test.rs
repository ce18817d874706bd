use super::*;

#[test]
fn search_placeholder_tracks_section() {
    assert_eq!(search_placeholder("/works"), "Search for works...");
    assert_eq!(search_placeholder("/freelancers"), "Search for freelancers...");
    assert_eq!(search_placeholder("/profile"), "Search Lanceraa...");
}

#[test]
fn nav_hides_only_when_scrolling_down_past_offset() {
    assert!(nav_visible(0.0, 50.0));
    assert!(!nav_visible(70.0, 120.0));
    assert!(nav_visible(300.0, 200.0));
    assert!(nav_visible(100.0, 100.0));
}

#[test]
fn bottom_nav_matches_exact_path() {
    assert!(is_active("/works", "/works"));
    assert!(!is_active("/works/12", "/works"));
    assert!(!is_active("/works", "/"));
}

#[test]
fn footer_year_comes_from_the_clock() {
    let year = current_year();
    assert!(year >= 2024, "unexpected year {year}");
}
