//! Query string parameters.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One `key=value` pair, unencoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// Parameter name, sent verbatim (`sort`, `s`, `o`, ...).
    pub key: String,
    /// Unencoded value.
    pub value: String,
}

/// Parameters in the order they will be sent. Duplicate keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<QueryParam>);

impl QueryParams {
    /// No parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a pair.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push(QueryParam {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// First value for `key`; keys are case-sensitive.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find_map(|p| (p.key == key).then_some(p.value.as_str()))
    }

    /// Pairs in send order.
    pub fn iter(&self) -> std::slice::Iter<'_, QueryParam> {
        self.0.iter()
    }

    /// Form-encodes the pairs, without a leading `?`.
    ///
    /// A literal `+` in a value is sent as `%2B`, so the server sees the
    /// character itself rather than a space.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuery` if encoding fails.
    pub fn to_query_string(&self) -> DomainResult<String> {
        let pairs: Vec<(&str, &str)> = self
            .0
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
            .collect();
        serde_urlencoded::to_string(pairs).map_err(|e| DomainError::InvalidQuery(e.to_string()))
    }
}
