//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates flow decisions to
//! `state` and rendering details to `components`.

pub mod complete_profile;
pub mod home;
pub mod login;
pub mod logout;
pub mod not_found;
pub mod profile;
pub mod signup;
pub mod verify_email;
