//! Custom middleware implementations.

pub mod security;

pub use security::*;
