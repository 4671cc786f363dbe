//! Health check endpoint handler.

use crate::models::HealthResponse;
use actix_web::{web, Error, Result};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Returns the current health status of the service. Responses pass through
/// the security headers middleware like any other route.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the current health status of the service in JSON format.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health() -> Result<web::Json<HealthResponse>, Error> {
    let response = HealthResponse {
        status: "healthy".to_string(),
    };

    Ok(web::Json(response))
}
