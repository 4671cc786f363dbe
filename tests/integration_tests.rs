use actix_web::{http::StatusCode, test};
use header_policy::{
    FlagOrValue, SecurityHeaders, SecurityPolicyConfig, create_app, handlers::UPSTREAM_POWERED_BY,
};

/// Integration test for the health check endpoint
///
/// Uses the full demo app factory, so the response travels through the
/// security headers middleware exactly as in production.
#[actix_web::test]
async fn test_health_endpoint_integration() {
    let app = test::init_service(create_app(SecurityHeaders::default())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK, "Expected 200 OK status");
    assert_eq!(
        resp.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(
        resp.headers().get("strict-transport-security").unwrap(),
        "max-age=31536000; includeSubDomains; preload"
    );

    let body = test::read_body(resp).await;
    let json: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse response as JSON");
    assert_eq!(json, serde_json::json!({ "status": "healthy" }));
}

/// The landing page sets its own `X-Powered-By`; the default policy replaces it.
#[actix_web::test]
async fn test_index_powered_by_is_overwritten_by_default() {
    let app = test::init_service(create_app(SecurityHeaders::default())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-powered-by").unwrap(), "Fake Server");
}

#[actix_web::test]
async fn test_index_powered_by_passes_through_when_enabled() {
    let overrides = SecurityPolicyConfig {
        powered_by: Some(FlagOrValue::Enabled(true)),
        ..SecurityPolicyConfig::empty()
    };
    let app = test::init_service(create_app(SecurityHeaders::with_overrides(&overrides))).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.headers().get("x-powered-by").unwrap(),
        UPSTREAM_POWERED_BY
    );
}

/// Policy loaded from (simulated) environment variables drives the demo app
#[actix_web::test]
async fn test_policy_from_environment_lookup() {
    let config = SecurityPolicyConfig::from_lookup(|var| match var {
        "X_POWERED_BY" => Some("false".to_string()),
        "X_FRAME_OPTIONS" => Some("DENY".to_string()),
        "HSTS_ENABLED" => Some("false".to_string()),
        _ => None,
    })
    .unwrap();
    let app = test::init_service(create_app(SecurityHeaders::new(config))).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(!resp.headers().contains_key("x-powered-by"));
    assert!(!resp.headers().contains_key("strict-transport-security"));
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
}

#[actix_web::test]
async fn test_openapi_spec_is_served_with_headers() {
    let app = test::init_service(create_app(SecurityHeaders::default())).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "SAMEORIGIN");

    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["info"]["title"], "Header Policy Demo");
}
