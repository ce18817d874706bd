//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the navigation shell and the small building blocks the
//! auth pages share, reading shared state from Leptos context providers.

pub mod alert_banner;
pub mod auth_guard;
pub mod nav;
pub mod spinner;
pub mod step_indicator;
