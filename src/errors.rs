use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::web::{Data, FormConfig, JsonConfig};
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use crate::config::{AppConfig, MAX_BODY_BYTES};
use crate::models::ErrorEnvelope;

/// Public message for any failure that reaches the terminal responder.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// # Terminal Request Failure
///
/// The single error type request handling converges on: handler failures
/// and body-decoding failures both end up here. Rendering answers 500 with
/// an [`ErrorEnvelope`]; the underlying detail reaches the client only when
/// the error was constructed under a development configuration.
///
/// A `ServiceError` terminates one request. It never terminates the process.
#[derive(Debug, thiserror::Error)]
#[error("{detail}")]
pub struct ServiceError {
    detail: String,
    expose_detail: bool,
}

impl ServiceError {
    pub fn internal(detail: impl Into<String>, dev_mode: bool) -> Self {
        Self {
            detail: detail.into(),
            expose_detail: dev_mode,
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self.detail, "Unhandled error");
        HttpResponse::InternalServerError().json(render_error(&self.detail, self.expose_detail))
    }
}

/// Build the envelope for a failed request. `dev_mode` is an explicit
/// parameter so the shaping stays a pure function of its inputs.
pub fn render_error(detail: &str, dev_mode: bool) -> ErrorEnvelope {
    let envelope = ErrorEnvelope::new(INTERNAL_ERROR_MESSAGE);
    if dev_mode {
        envelope.with_details(detail)
    } else {
        envelope
    }
}

/// JSON body decoding: 10 MiB limit, failures routed to the terminal
/// responder instead of the framework's default error page.
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err: JsonPayloadError, req| {
            ServiceError::internal(err.to_string(), dev_mode_of(req)).into()
        })
}

/// URL-encoded body decoding, same limit and failure routing as JSON.
pub fn form_config() -> FormConfig {
    FormConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err: UrlencodedError, req| {
            ServiceError::internal(err.to_string(), dev_mode_of(req)).into()
        })
}

fn dev_mode_of(req: &HttpRequest) -> bool {
    req.app_data::<Data<AppConfig>>()
        .map(|config| config.is_development())
        .unwrap_or(false)
}
