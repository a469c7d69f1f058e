use std::fmt;

/// A `Content-Type` header value: a MIME type plus an optional charset.
///
/// Gateways post either JSON or form-urlencoded bodies; the transport layer
/// writes exactly one `Content-Type` header built from this descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    mime_type: String,
    charset: Option<String>,
}

impl ContentType {
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            charset: None,
        }
    }

    pub fn with_charset(mime_type: impl Into<String>, charset: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            charset: Some(charset.into()),
        }
    }

    /// `application/json`, UTF-8 by convention
    pub fn json() -> Self {
        Self::with_charset("application/json", "UTF-8")
    }

    /// `application/x-www-form-urlencoded`, the legacy card-processor default
    pub fn form_urlencoded() -> Self {
        Self::with_charset("application/x-www-form-urlencoded", "ISO-8859-1")
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.charset {
            Some(charset) => write!(f, "{}; charset={}", self.mime_type, charset),
            None => f.write_str(&self.mime_type),
        }
    }
}
