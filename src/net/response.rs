/// Status code recorded when no HTTP exchange took place at all
/// (connection refused, DNS failure, timeout before a response).
pub const STATUS_NO_EXCHANGE: i32 = -1;

/// Outcome of one HTTP exchange.
///
/// Every transport call produces exactly one of these. A positive
/// `status_code` is the real server-reported status; [`STATUS_NO_EXCHANGE`]
/// means the body holds a serialized [`ErrorResponse`] instead of anything
/// the server sent.
///
/// [`ErrorResponse`]: crate::gateways::responses::ErrorResponse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code, or [`STATUS_NO_EXCHANGE`]
    pub status_code: i32,

    /// Response body text; a synthetic error payload in the sentinel case
    pub body: String,

    /// Wall-clock duration of the network call, in milliseconds
    pub elapsed_ms: u64,

    /// The exact payload sent, retained for diagnostics (POST only)
    pub request_body: Option<String>,
}

impl HttpResponse {
    pub fn new(status_code: i32, body: String, elapsed_ms: u64) -> Self {
        Self {
            status_code,
            body,
            elapsed_ms,
            request_body: None,
        }
    }

    /// Attaches the request payload. Called once, immediately after
    /// construction of a POST response; the value is not touched afterwards.
    pub fn with_request_body(mut self, request_body: impl Into<String>) -> Self {
        self.request_body = Some(request_body.into());
        self
    }

    /// True when no HTTP exchange occurred and `body` is a synthetic
    /// error payload rather than a server response.
    pub fn is_transport_failure(&self) -> bool {
        self.status_code == STATUS_NO_EXCHANGE
    }

    /// True for a 2xx server status. Always false for a transport failure.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
