use actix_web::HttpServer;
use header_policy::{
    SecurityHeaders, SecurityPolicyConfig, create_app,
    logging::{LoggingConfig, init_tracing},
};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Set RUST_LOG=security_headers=debug to trace every header action
    init_tracing(&LoggingConfig::from_env()).map_err(io::Error::other)?;

    let config = SecurityPolicyConfig::from_env().map_err(|err| {
        tracing::error!(error = %err, "Invalid security headers configuration");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let security = SecurityHeaders::new(config);

    tracing::info!(
        headers = ?security.config().active_headers(),
        "Server running at http://127.0.0.1:8080"
    );

    HttpServer::new(move || create_app(security.clone()))
        .bind("127.0.0.1:8080")?
        .run()
        .await
}
