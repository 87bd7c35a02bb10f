/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
/// Used as the response format for the health check endpoint.
pub mod health;

/// # Wire Payloads
///
/// Service identity payload for the root endpoint and the error envelope
/// shared by the not-found and terminal error responders.
pub mod api;

pub use api::{ApiInfo, ErrorEnvelope};
pub use health::HealthResponse;
