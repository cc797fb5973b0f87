//! Harness configuration.
//!
//! Values that are meant to be edited before a run. The defaults reproduce
//! the reference run against the public API.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::request::{DEFAULT_BASE_URL, RequestTemplate};

/// Immutable configuration handed to the harness at setup.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base address of the search API.
    pub base_url: String,
    /// Account whose repositories the user search targets.
    pub username: String,
    /// `created:` filter, including its comparison (e.g. `<2011-01-01`).
    pub created_before: String,
    /// Language fixtures driving the parameterized cases.
    pub languages: Vec<String>,
}

impl HarnessConfig {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` or `DomainError::InvalidUrl`
    /// naming the first bad value.
    pub fn validate(&self) -> DomainResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "base URL must use http or https: {}",
                self.base_url
            )));
        }

        if self.username.trim().is_empty() || self.username.contains(char::is_whitespace) {
            return Err(DomainError::InvalidConfig(format!(
                "username must be a single non-empty login, got '{}'",
                self.username
            )));
        }

        if self.created_before.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "created_before must not be empty".to_string(),
            ));
        }

        if self.languages.is_empty() {
            return Err(DomainError::InvalidConfig(
                "at least one language fixture is required".to_string(),
            ));
        }
        if let Some(blank) = self.languages.iter().position(|l| l.trim().is_empty()) {
            return Err(DomainError::InvalidConfig(format!(
                "language fixture #{blank} is empty"
            )));
        }

        Ok(())
    }

    /// Builds the shared request template for this configuration.
    #[must_use]
    pub fn request_template(&self) -> RequestTemplate {
        RequestTemplate::new(self.base_url.clone())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: "faran".to_string(),
            created_before: "<2011-01-01".to_string(),
            languages: vec![
                "java".to_string(),
                "c++".to_string(),
                "javascript".to_string(),
            ],
        }
    }
}
