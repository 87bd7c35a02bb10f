use crate::models::ApiInfo;
use actix_web::{HttpResponse, Responder, get};

/// # Service Identity Endpoint
///
/// Returns a static identity payload naming the service, its version, and
/// where the interactive documentation lives.
///
/// ## Response
///
/// - **200 OK**
///   - Body: JSON object with `message`, `version`, `timestamp` and
///     `documentation`
///
/// ## Example Response
///
/// ```json
/// {
///   "message": "AI Dev Team API",
///   "version": "1.0.0",
///   "timestamp": "2023-10-05T12:34:56.789Z",
///   "documentation": "/api-docs"
/// }
/// ```
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(ApiInfo::current())
}
