//! Navigation shell: top bar, mobile bottom bar and footer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by `App` around the routed page. Reads the shared auth and theme
//! signals; writes only the theme.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;
use crate::util::storage::LocalStorage;
use crate::util::theme::{self, Theme};

/// Scroll offset below which the top bar is always shown.
pub const NAV_HIDE_OFFSET: f64 = 80.0;

const TOP_LINKS: &[(&str, &str)] = &[("Home", "/"), ("Freelancers", "/freelancers"), ("Works", "/works"), ("Profile", "/profile")];

#[must_use]
pub fn search_placeholder(path: &str) -> &'static str {
    match path {
        "/works" => "Search for works...",
        "/freelancers" => "Search for freelancers...",
        _ => "Search Lanceraa...",
    }
}

/// Hide while scrolling down past the offset; show on any upward scroll.
#[must_use]
pub fn nav_visible(last_y: f64, current_y: f64) -> bool {
    !(current_y > last_y && current_y > NAV_HIDE_OFFSET)
}

/// Exact path match for bottom bar highlighting.
#[must_use]
pub fn is_active(current: &str, href: &str) -> bool {
    current == href
}

/// Current calendar year (UTC on the server, local time in the browser).
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn current_year() -> i32 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0().get_full_year() as i32
    }
    #[cfg(not(feature = "hydrate"))]
    {
        time::OffsetDateTime::now_utc().year()
    }
}

#[component]
pub fn TopNavbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let theme_signal = expect_context::<RwSignal<Theme>>();
    let location = use_location();
    let visible = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    {
        let last_y = StoredValue::new(0.0_f64);
        let handle = window_event_listener(leptos::ev::scroll, move |_| {
            let y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
            visible.set(nav_visible(last_y.get_value(), y));
            last_y.set_value(y);
        });
        on_cleanup(move || handle.remove());
    }

    let placeholder = move || search_placeholder(&location.pathname.get());
    let on_toggle_theme = move |_| {
        theme_signal.set(theme::toggle(&LocalStorage, theme_signal.get_untracked()));
    };

    view! {
        <header class="top-nav" class:top-nav--hidden=move || !visible.get()>
            <A href="/" attr:class="top-nav__brand">"Lanceraa"</A>
            <nav class="top-nav__links">
                {TOP_LINKS
                    .iter()
                    .map(|(label, href)| view! { <A href=*href attr:class="top-nav__link">{*label}</A> })
                    .collect_view()}
            </nav>
            <input class="top-nav__search" type="search" placeholder=placeholder/>
            <button class="top-nav__theme" aria-label="Toggle theme" on:click=on_toggle_theme>
                {move || if theme_signal.get().is_dark() { "☀" } else { "☾" }}
            </button>
            {move || match auth.get().user() {
                Some(user) => {
                    let initials = user.initials();
                    view! {
                        <A href="/profile" attr:class="top-nav__avatar">{initials}</A>
                    }
                        .into_any()
                }
                None => view! { <A href="/signup" attr:class="btn btn--primary">"Sign up"</A> }.into_any(),
            }}
        </header>
    }
}

#[component]
pub fn BottomNavbar() -> impl IntoView {
    let location = use_location();
    let item = move |label: &'static str, href: &'static str| {
        view! {
            <A
                href=href
                attr:class=move || {
                    if is_active(&location.pathname.get(), href) {
                        "bottom-nav__item bottom-nav__item--active"
                    } else {
                        "bottom-nav__item"
                    }
                }
            >
                {label}
            </A>
        }
    };

    view! {
        <nav class="bottom-nav">
            {item("Home", "/")}
            {item("Works", "/works")}
            <button class="bottom-nav__post">"Post"</button>
            {item("Lancers", "/freelancers")}
            {item("Profile", "/profile")}
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = current_year();
    view! {
        <footer class="footer">
            <p>{format!("© {year} Lanceraa. All rights reserved.")}</p>
        </footer>
    }
}
