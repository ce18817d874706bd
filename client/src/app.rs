//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_guard::AuthGuard;
use crate::components::nav::{BottomNavbar, Footer, TopNavbar};
use crate::pages::{
    complete_profile::CompleteProfilePage, home::HomePage, login::LoginPage, logout::LogoutPage,
    not_found::NotFoundPage, profile::ProfilePage, signup::SignupPage, verify_email::VerifyEmailPage,
};
use crate::state::auth::AuthState;
use crate::util::theme::Theme;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en" data-theme="light">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and theme contexts, starts the session bootstrap after
/// hydration, and sets up client-side routing behind the route guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let theme = RwSignal::new(Theme::default());
    provide_context(auth);
    provide_context(theme);

    #[cfg(feature = "hydrate")]
    {
        use crate::util::storage::LocalStorage;
        use crate::util::theme;

        let preferred = theme::resolve(&LocalStorage, theme::system_prefers_dark());
        theme::apply(preferred);
        theme.set(preferred);
        crate::state::session::start(auth);
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/lanceraa.css"/>
        <Title text="Lanceraa"/>

        <Router>
            <TopNavbar/>
            <div class="page">
                <AuthGuard>
                    <Routes fallback=NotFoundPage>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("signup") view=SignupPage/>
                        <Route path=(StaticSegment("verify-email"), ParamSegment("user_id")) view=VerifyEmailPage/>
                        <Route
                            path=(StaticSegment("complete-profile"), ParamSegment("user_id"))
                            view=CompleteProfilePage
                        />
                        <Route path=StaticSegment("profile") view=ProfilePage/>
                        <Route path=StaticSegment("logout") view=LogoutPage/>
                    </Routes>
                </AuthGuard>
            </div>
            <Footer/>
            <BottomNavbar/>
        </Router>
    }
}
