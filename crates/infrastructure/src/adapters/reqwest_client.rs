//! `HttpClient` backed by reqwest.

use std::collections::HashMap;
use std::error::Error as _;
use std::io;
use std::time::Instant;

use reposcout_application::ports::{HttpClient, HttpClientError};
use reposcout_domain::{request::RequestSpec, response::ResponseSpec};
use reqwest::{Client, Url, redirect};
use tracing::{debug, trace};

/// User-Agent sent with every request; the search API rejects requests
/// without one.
pub const USER_AGENT: &str = concat!("reposcout/", env!("CARGO_PKG_VERSION"));

const MAX_REDIRECTS: usize = 10;

/// Sends requests with a shared `reqwest::Client`.
///
/// Timeouts stay at the reqwest defaults and nothing is retried.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Builds a client with [`USER_AGENT`], TLS verification and at most
    /// ten redirects.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::Other` if the TLS backend fails to load.
    pub fn new() -> Result<Self, HttpClientError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map(Self::with_client)
            .map_err(|e| HttpClientError::Other(e.to_string()))
    }

    /// Wraps a preconfigured client, e.g. one that bypasses proxies.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Sends a GET to `url` with the request's headers and reads the whole body.
    async fn get(&self, url: Url, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let builder = request
            .headers
            .iter()
            .fold(self.client.get(url), |b, h| {
                b.header(h.name.as_str(), h.value.as_str())
            });

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| classify(&e))?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("failed to read body: {e}")))?;
        let elapsed = started.elapsed();

        trace!(status, bytes = body.len(), ?elapsed, "response body read");
        Ok(ResponseSpec::new(status, headers, body.to_vec(), elapsed))
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let request = request.clone();
        async move {
            let url = request
                .parse_url()
                .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
            debug!(%url, "dispatching");
            self.get(url, &request).await
        }
    }
}

/// Maps a reqwest failure onto the transport error the port exposes.
fn classify(error: &reqwest::Error) -> HttpClientError {
    if error.is_timeout() {
        return HttpClientError::Timeout;
    }
    if error.is_redirect() {
        return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
    }
    if !error.is_connect() {
        return HttpClientError::Other(error.to_string());
    }

    let url = error.url();
    let host = url
        .and_then(Url::host_str)
        .unwrap_or("unknown")
        .to_string();

    let mut source = error.source();
    while let Some(cause) = source {
        if cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::ConnectionRefused)
        {
            let port = url.and_then(Url::port_or_known_default).unwrap_or(80);
            return HttpClientError::ConnectionRefused { host, port };
        }
        let text = cause.to_string().to_ascii_lowercase();
        if text.contains("dns") || text.contains("failed to lookup") {
            return HttpClientError::DnsError {
                host,
                message: cause.to_string(),
            };
        }
        source = cause.source();
    }
    HttpClientError::ConnectionFailed(error.to_string())
}
