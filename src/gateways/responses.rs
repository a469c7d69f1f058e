use serde::Serialize;

/// Synthetic, gateway-agnostic error payload.
///
/// Built fresh whenever the transport fails before any server response
/// exists, and serialized into the body of the sentinel [`HttpResponse`].
///
/// [`HttpResponse`]: crate::net::HttpResponse
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub cause: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, cause: Option<String>) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    /// JSON text form used as a response body.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "message": self.message,
            "cause": self.cause,
        })
        .to_string()
    }
}
