//! Decoded body of a repository search response.

use serde::{Deserialize, Serialize};

/// Top-level search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Number of repositories matching the query across all pages.
    pub total_count: u64,
    /// True when the API timed out and returned a partial result.
    #[serde(default)]
    pub incomplete_results: bool,
    /// First page of matching repositories.
    pub items: Vec<Repository>,
}

impl SearchResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match the search contract.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Returns the first item, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Repository> {
        self.items.first()
    }

    /// Returns true if the page holds no items.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A repository entry in the search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository id.
    #[serde(default)]
    pub id: u64,
    /// Short name.
    #[serde(default)]
    pub name: String,
    /// `owner/name`.
    #[serde(default)]
    pub full_name: String,
    /// Owning account.
    pub owner: Owner,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,
    /// Declared license.
    #[serde(default)]
    pub license: Option<License>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Repository owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Account login.
    pub login: String,
}

/// License summary attached to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Lowercase license key (e.g. `apache-2.0`).
    pub key: String,
    /// SPDX identifier (e.g. `Apache-2.0`).
    #[serde(default)]
    pub spdx_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "total_count": 2,
        "incomplete_results": false,
        "items": [
            {
                "id": 1,
                "name": "selenium",
                "full_name": "faran/selenium",
                "owner": { "login": "faran", "id": 7 },
                "stargazers_count": 2500,
                "forks_count": 12,
                "language": "Java",
                "license": { "key": "apache-2.0", "spdx_id": "Apache-2.0" },
                "created_at": "2010-05-01T00:00:00Z"
            },
            {
                "owner": { "login": "faran" },
                "license": null
            }
        ]
    }"#;

    #[test]
    fn test_decode_search_response() {
        let response = SearchResponse::from_json(BODY).unwrap();
        assert_eq!(response.total_count, 2);
        assert!(!response.incomplete_results);

        let first = response.first().unwrap();
        assert_eq!(first.owner.login, "faran");
        assert_eq!(first.stargazers_count, 2500);
        assert_eq!(first.license.as_ref().map(|l| l.key.as_str()), Some("apache-2.0"));

        let second = &response.items[1];
        assert_eq!(second.stargazers_count, 0);
        assert!(second.license.is_none());
    }

    #[test]
    fn test_missing_items_is_an_error() {
        assert!(SearchResponse::from_json(r#"{"total_count": 1}"#).is_err());
    }

    #[test]
    fn test_empty_page() {
        let response =
            SearchResponse::from_json(r#"{"total_count": 0, "items": []}"#).unwrap();
        assert!(response.is_empty());
        assert!(response.first().is_none());
    }
}
