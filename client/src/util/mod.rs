//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, broadcast, theme) and
//! pure decision logic (route guard, validation, debounce, cooldown) from
//! page and component code.

pub mod auth;
pub mod broadcast;
pub mod cooldown;
pub mod debounce;
pub mod storage;
pub mod theme;
pub mod validation;
