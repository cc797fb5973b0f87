//! Request template and request specification types

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{Headers, QueryParams};
use crate::error::{DomainError, DomainResult};

/// Default base address of the search API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Media type the search API documents for its JSON responses.
pub const GITHUB_JSON_ACCEPT: &str = "application/vnd.github+json";

/// Shared request configuration applied to every outgoing call.
///
/// Built once before any case runs and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// Base address every request path is resolved against.
    pub base_url: String,
    /// Headers sent with every request.
    #[serde(default)]
    pub headers: Headers,
}

impl RequestTemplate {
    /// Creates a template for the given base address.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut headers = Headers::new();
        headers.set("Accept", GITHUB_JSON_ACCEPT);
        Self {
            base_url: base_url.into(),
            headers,
        }
    }

    /// Builds a GET request for `path` with the given query parameters.
    #[must_use]
    pub fn get(&self, name: impl Into<String>, path: impl Into<String>, query: QueryParams) -> RequestSpec {
        RequestSpec {
            id: Uuid::now_v7(),
            name: name.into(),
            base_url: self.base_url.clone(),
            path: path.into(),
            query,
            headers: self.headers.clone(),
        }
    }
}

impl Default for RequestTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Complete specification for a single HTTP request. Requests are
/// always sent as `GET`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Unique identifier for this request
    pub id: Uuid,
    /// Human-readable name
    pub name: String,
    /// Base address taken from the request template
    pub base_url: String,
    /// Path relative to the base address (e.g. `/search/repositories`)
    pub path: String,
    /// Ordered query parameters
    #[serde(default)]
    pub query: QueryParams,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
}

impl RequestSpec {
    /// Returns the base address joined with the path, without a query.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    /// Returns the endpoint with the encoded query string appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the query parameters cannot be encoded.
    pub fn full_url(&self) -> DomainResult<String> {
        let query = self.query.to_query_string()?;
        if query.is_empty() {
            Ok(self.endpoint())
        } else {
            Ok(format!("{}?{query}", self.endpoint()))
        }
    }

    /// Validates the full URL and returns the parsed version.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> DomainResult<Url> {
        let url = self.full_url()?;
        Url::parse(&url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))
    }
}
