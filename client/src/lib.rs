//! # lanceraa-client
//!
//! Leptos + WASM frontend for the Lanceraa freelance marketplace.
//!
//! This crate contains the pages, the navigation shell, the session and
//! signup/login/verification flows, and the REST client for the backend
//! auth API. Flow logic is written against small ports (`HttpClient`,
//! `KeyValueStore`, `SessionChannel`) so it is unit-tested natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: wire logging, then hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    leptos::mount::hydrate_body(app::App);
}
