//! Client-side state and flow controllers.
//!
//! DESIGN
//! ======
//! `auth` is the shared session model. `session`, `login`, `signup` and
//! `verification` hold the flow logic behind the auth pages, written against
//! the `HttpClient`/`KeyValueStore`/`SessionChannel` ports so it runs in
//! native tests. `alert` is the banner model those pages render.

pub mod alert;
pub mod auth;
pub mod login;
pub mod session;
pub mod signup;
pub mod verification;
