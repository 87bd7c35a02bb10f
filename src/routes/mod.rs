use actix_web::{HttpRequest, HttpResponse, web};

use crate::models::ErrorEnvelope;

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: JSON object with `status` ("healthy") and `timestamp` in ISO 8601 format
pub mod health;

/// # Service Identity Endpoint
///
/// Static payload naming the service, its version, and the documentation
/// path.
pub mod root;

/// # API Route Configuration
///
/// Mounts the service's JSON endpoints.
///
/// ## Mounted Services
/// - Root identity endpoint at `/`
/// - Health check endpoints under the `/api` base path (see
///   [`health::configure_routes`] for details)
///
/// ## Example Endpoints
///
/// ```text
/// GET /           - Service identity
/// GET /api/health - Service health status
/// ```
///
/// [`health::configure_routes`]: crate::routes::health::configure_routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root::index)
        .service(web::scope("/api").configure(health::configure_routes));
}

/// Catch-all responder for requests that matched no registered route.
/// Registered as the app's default service so every unmatched method and
/// path lands here, echoing the original path in the envelope.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorEnvelope::not_found(req.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_not_found_envelope() {
        let app = test::init_service(
            App::new()
                .configure(configure)
                .default_service(web::route().to(not_found)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/nonexistent-route")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);

        let body = test::read_body(resp).await;
        let body_json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body_json["success"], Value::Bool(false));
        assert_eq!(body_json["error"], "Route /nonexistent-route not found");
        assert!(body_json["timestamp"].is_string());
    }
}
