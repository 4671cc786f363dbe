//! Configuration structures and loading utilities.
//!
//! This module contains the per-header option types and the policy record
//! the middleware is built from, including environment and JSON loading.

pub mod options;
pub mod security;

pub use options::*;
pub use security::*;
