//! Captured HTTP response.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Numeric HTTP status with the reason phrases the search API returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Returns true for 2xx.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self.0, 200..=299)
    }

    /// Reason phrase, if the code is one the search endpoint is known to use.
    #[must_use]
    pub const fn reason(self) -> Option<&'static str> {
        Some(match self.0 {
            200 => "OK",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => return None,
        })
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} {reason}", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Everything the harness keeps from one HTTP exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSpec {
    /// Numeric status.
    pub status: u16,
    /// Header names as received; look them up with [`ResponseSpec::get_header`].
    pub headers: HashMap<String, String>,
    /// Body decoded as UTF-8, lossily.
    pub body: String,
    /// Time from send to last body byte.
    pub duration: Duration,
    /// Copy of the `Content-Type` header, if any.
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Builds a response from the raw parts an HTTP client hands back.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let mut response = Self {
            status: status.into().0,
            headers,
            body: match String::from_utf8(body) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
            duration,
            content_type: None,
        };
        response.content_type = response.get_header("content-type").cloned();
        response
    }

    /// Status as a [`StatusCode`].
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode(self.status)
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v))
    }

    /// Elapsed time for log lines: milliseconds below one second.
    #[must_use]
    pub fn duration_display(&self) -> String {
        if self.duration < Duration::from_secs(1) {
            format!("{} ms", self.duration.as_millis())
        } else {
            format!("{:.2} s", self.duration.as_secs_f64())
        }
    }
}
