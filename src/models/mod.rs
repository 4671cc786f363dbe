//! Data models for the demo endpoints.

pub mod api;

pub use api::*;
