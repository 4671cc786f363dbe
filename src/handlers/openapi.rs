//! OpenAPI specification generation and app factory.

use crate::{
    handlers::{health, index},
    middleware::SecurityHeaders,
};
use actix_web::App;
use paperclip::actix::{web, OpenApiExt};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the OpenAPI specification for the demo app
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Header Policy Demo".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Demo service whose every response is post-processed by the security \
                headers middleware.\n\n\
                **Managed headers:** `Strict-Transport-Security`, `Referrer-Policy`, \
                `Expect-CT`, `X-Frame-Options`, `X-Content-Type-Options`, \
                `X-XSS-Protection`, `X-Permitted-Cross-Domain-Policies`, `X-Powered-By`.\n\n\
                **Configuration:** see `SecurityPolicyConfig::from_env` for the \
                environment variables (`HSTS_MAX_AGE`, `REFERRER_POLICY`, `X_POWERED_BY`, ...)."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the demo app wrapped by the given security headers middleware
///
/// Pass a clone of one [`SecurityHeaders`] to every worker so the effective
/// policy is built once per process.
pub fn create_app(
    security: SecurityHeaders,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(security)
        .wrap_api_with_spec(create_openapi_spec())
        .service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
