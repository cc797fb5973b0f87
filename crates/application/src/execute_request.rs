//! Sends one request through the `HttpClient` port.

use std::sync::Arc;

use reposcout_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ports::{HttpClient, HttpClientError};

/// Outcome of [`ExecuteRequest::execute`].
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Why a request produced no response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteRequestError {
    /// Rejected before anything was sent.
    #[error("invalid request: {0}")]
    Invalid(String),

    /// The client failed to complete the exchange.
    #[error(transparent)]
    Transport(#[from] HttpClientError),
}

/// Checks a request is addressable, sends it and logs the exchange.
///
/// Any status code counts as a response here; judging it is the caller's job.
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Wraps a client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Sends `request` once.
    ///
    /// # Errors
    ///
    /// `Invalid` when the base address is blank, not http(s), or the URL
    /// cannot be assembled; `Transport` for client failures.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        let url = target(request)?;
        info!(%url, case = %request.name, "sending GET");
        for header in &request.headers {
            debug!(name = %header.name, value = %header.value, "request header");
        }

        match self.client.execute(request).await {
            Ok(response) => {
                info!(
                    status = response.status,
                    content_type = response.content_type.as_deref().unwrap_or("-"),
                    elapsed = %response.duration_display(),
                    "received response"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(%url, error = %e, "request failed");
                Err(e.into())
            }
        }
    }
}

fn target(request: &RequestSpec) -> Result<String, ExecuteRequestError> {
    let base = request.base_url.trim();
    if base.is_empty() {
        return Err(ExecuteRequestError::Invalid("base URL is empty".to_string()));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ExecuteRequestError::Invalid(format!(
            "base URL must start with http:// or https://, got '{base}'"
        )));
    }
    request
        .full_url()
        .map_err(|e| ExecuteRequestError::Invalid(e.to_string()))
}
