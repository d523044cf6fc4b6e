use axum::response::{IntoResponse, Response};
use axum::Json;

/// Failures of a booking request. Every variant renders as HTTP 200 with
/// `success: false` in the body; callers read the envelope, not the status
/// code.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing required fields: client_id, service, and datetime are required")]
    MissingFields,

    #[error("Invalid service: \"{0}\". Use a valid service UUID or name like \"haircut_standard\", \"wash\", etc.")]
    UnknownService(String),

    /// Upstream error message, surfaced verbatim.
    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });
        Json(body).into_response()
    }
}
