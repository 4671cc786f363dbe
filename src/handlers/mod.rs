//! HTTP request handlers for the demo application.

pub mod health;
pub mod index;
pub mod openapi;

pub use health::*;
pub use index::*;
pub use openapi::*;
