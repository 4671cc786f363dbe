//! Landing page handler.

use actix_web::HttpResponse;
use paperclip::actix::api_v2_operation;

/// Server banner the handler sets itself, so the `X-Powered-By` policy has
/// something to overwrite, delete or pass through.
pub const UPSTREAM_POWERED_BY: &str = "actix-web";

#[api_v2_operation(
    summary = "Landing Page",
    description = "Returns a short plain-text banner.",
    tags("Index"),
    responses(
        (status = 200, description = "Successful response")
    )
)]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .insert_header(("X-Powered-By", UPSTREAM_POWERED_BY))
        .body("header-policy demo server\n")
}
