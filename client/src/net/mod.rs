//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the transport port, `api` wraps the auth endpoints, and
//! `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod types;
