use std::time::Instant;

use reqwest::blocking::Client;
use tracing::debug;

use crate::core::Result;
use crate::gateways::responses::ErrorResponse;

use super::content_type::ContentType;
use super::response::{HttpResponse, STATUS_NO_EXCHANGE};

/// Diagnostic message carried in the body of a sentinel POST response.
pub const CONNECT_FAILURE_MESSAGE: &str = "could not connect to host";

/// Performs a blocking GET and returns the server's response.
///
/// A fresh client is created for the call and dropped before returning, so
/// each invocation owns its connection for exactly the duration of the
/// exchange. Latency is measured around the network call only.
///
/// Unlike [`http_post`], a transport failure here propagates to the caller
/// as an error; GET never synthesizes a sentinel response.
pub fn http_get(url: &str) -> Result<HttpResponse> {
    let client = Client::new();
    let request = client.get(url);

    let started = Instant::now();
    let response = request.send()?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let status_code = i32::from(response.status().as_u16());
    let body = response.text()?;

    debug!(url, status_code, elapsed_ms, "http GET completed");
    Ok(HttpResponse::new(status_code, body, elapsed_ms))
}

/// Performs a blocking POST with the content type's own header
/// representation. Equivalent to [`http_post_with_charset`] with the
/// charset left absent.
pub fn http_post(url: &str, body: &str, content_type: &ContentType) -> HttpResponse {
    post_internal(url, body, content_type, None)
}

/// Performs a blocking POST, overriding the content type's charset.
///
/// The single `Content-Type` header written is the content type's MIME
/// type combined with `charset`.
pub fn http_post_with_charset(
    url: &str,
    body: &str,
    content_type: &ContentType,
    charset: &str,
) -> HttpResponse {
    post_internal(url, body, content_type, Some(charset))
}

/// POST never raises: any transport failure is absorbed into a sentinel
/// response so gateway code always has a value to inspect.
fn post_internal(
    url: &str,
    body: &str,
    content_type: &ContentType,
    charset: Option<&str>,
) -> HttpResponse {
    let header_value = match charset {
        Some(charset) => ContentType::with_charset(content_type.mime_type(), charset).to_string(),
        None => content_type.to_string(),
    };

    // Covers the whole attempt if the exchange never completes.
    let attempt_started = Instant::now();

    match execute_post(url, body, &header_value) {
        Ok(response) => {
            debug!(
                url,
                status_code = response.status_code,
                elapsed_ms = response.elapsed_ms,
                "http POST completed"
            );
            response.with_request_body(body)
        }
        Err(e) => {
            let elapsed_ms = attempt_started.elapsed().as_millis() as u64;
            debug!(url, elapsed_ms, error = %e, "http POST failed before a response was received");
            let error_body = ErrorResponse::new(CONNECT_FAILURE_MESSAGE, None).to_json();
            HttpResponse::new(STATUS_NO_EXCHANGE, error_body, elapsed_ms)
        }
    }
}

fn execute_post(url: &str, body: &str, header_value: &str) -> reqwest::Result<HttpResponse> {
    let client = Client::new();
    let request = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, header_value)
        .body(body.to_owned());

    let started = Instant::now();
    let response = request.send()?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let status_code = i32::from(response.status().as_u16());
    let text = response.text()?;

    Ok(HttpResponse::new(
        status_code,
        strip_leading_bom(text),
        elapsed_ms,
    ))
}

/// Some processors prefix their responses with a UTF-8 byte-order mark,
/// which would otherwise end up glued to the first character of the body.
fn strip_leading_bom(body: String) -> String {
    match body.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_owned(),
        None => body,
    }
}
