//! Header serialization and policy application.
//!
//! The serializers are pure functions of configuration; `apply_policy` runs
//! them against a response's header map.

pub mod policy;
pub mod serializers;

pub use policy::apply_policy;
pub use serializers::HeaderAction;
