//! Header Policy - security response headers middleware for Actix Web
//!
//! Every response leaving the wrapped service is post-processed according to
//! an immutable policy: a fixed set of browser security headers is set,
//! overwritten or deleted.
//!
//! ## Managed headers
//!
//! | Header                              | Option                     | Built-in default                                   |
//! |-------------------------------------|----------------------------|----------------------------------------------------|
//! | `Strict-Transport-Security`         | [`StrictTransportSecurity`] | `max-age=31536000; includeSubDomains; preload`    |
//! | `Referrer-Policy`                   | [`ReferrerPolicyOption`]   | `no-referrer, strict-origin-when-cross-origin`     |
//! | `Expect-CT`                         | [`ExpectCt`]               | `max-age=86400`                                    |
//! | `X-Frame-Options`                   | [`FlagOrValue`]            | `SAMEORIGIN`                                       |
//! | `X-Content-Type-Options`            | `bool`                     | `nosniff`                                          |
//! | `X-XSS-Protection`                  | `bool`                     | `1; mode=block`                                    |
//! | `X-Permitted-Cross-Domain-Policies` | [`FlagOrValue`]            | `none`                                             |
//! | `X-Powered-By`                      | [`FlagOrValue`]            | `Fake Server`                                      |
//!
//! ## Architecture
//!
//! - `config/` - option types, the policy record, merge and loading
//! - `services/` - pure header serializers and `apply_policy`
//! - `middleware/` - the Actix Web `Transform`/`Service` pair
//! - `handlers/`, `models/` - demo endpoints and app factory
//! - `error` - validation and configuration errors
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::{App, HttpServer, web};
//! use header_policy::{FlagOrValue, SecurityHeaders, SecurityPolicyConfig};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let overrides = SecurityPolicyConfig {
//!         powered_by: Some(FlagOrValue::Enabled(false)),
//!         ..SecurityPolicyConfig::empty()
//!     };
//!     let security = SecurityHeaders::with_overrides(&overrides);
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .wrap(security.clone())
//!             .route("/", web::get().to(|| async { "ok" }))
//!     })
//!     .bind("127.0.0.1:8080")?
//!     .run()
//!     .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::{
    ExpectCt, FlagOrValue, ReferrerPolicy, ReferrerPolicyOption, SecurityPolicyConfig,
    StrictTransportSecurity,
};
pub use error::{ConfigError, ValidationError};
pub use handlers::{create_app, create_openapi_spec, health, index};
pub use middleware::{SecurityHeaders, SecurityHeadersMiddleware};
pub use models::HealthResponse;
pub use services::{apply_policy, HeaderAction};
