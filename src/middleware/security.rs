//! Security headers middleware implementation.

use crate::{config::SecurityPolicyConfig, services::apply_policy};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    sync::Arc,
};

/// Security headers middleware factory
///
/// Holds the effective policy, built once and shared read-only by every
/// worker's service instance.
#[derive(Clone)]
pub struct SecurityHeaders {
    config: Arc<SecurityPolicyConfig>,
}

impl SecurityHeaders {
    /// Create a new security headers middleware from an effective policy
    pub fn new(config: SecurityPolicyConfig) -> Self {
        tracing::debug!(
            target: "security_headers",
            headers = ?config.active_headers(),
            "Security headers policy built"
        );
        Self {
            config: Arc::new(config),
        }
    }

    /// Create the middleware from the built-in defaults with `overrides` merged over them
    pub fn with_overrides(overrides: &SecurityPolicyConfig) -> Self {
        Self::new(SecurityPolicyConfig::with_overrides(overrides))
    }

    /// The effective policy this middleware applies
    pub fn config(&self) -> &SecurityPolicyConfig {
        &self.config
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::new(SecurityPolicyConfig::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service,
            config: Arc::clone(&self.config),
        }))
    }
}

/// The actual security headers middleware service
pub struct SecurityHeadersMiddleware<S> {
    service: S,
    config: Arc<SecurityPolicyConfig>,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();
        let fut = self.service.call(req);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            // Downstream failures pass through untouched
            let mut res = fut.await?;

            if let Err(err) = apply_policy(&config, res.headers_mut()) {
                tracing::error!(
                    target: "security_headers",
                    path = %path,
                    error = %err,
                    "Failed to apply security headers"
                );
                return Err(err.into());
            }

            Ok(res)
        })
    }
}
