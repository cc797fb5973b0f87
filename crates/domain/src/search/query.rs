//! Search query expression and sort/order parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::QueryParams;

/// Path of the repository search endpoint.
pub const SEARCH_REPOSITORIES_PATH: &str = "/search/repositories";

/// A single `key:value` qualifier of the search mini-language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    /// Qualifier name (e.g. `language`).
    pub key: String,
    /// Qualifier value, including any range operator (e.g. `>=2000`).
    pub value: String,
}

impl Qualifier {
    /// Creates a qualifier from raw parts.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// `user:<login>`
    #[must_use]
    pub fn user(login: impl Into<String>) -> Self {
        Self::new("user", login)
    }

    /// `language:<name>`
    #[must_use]
    pub fn language(name: impl Into<String>) -> Self {
        Self::new("language", name)
    }

    /// `created:<filter>`, where the filter carries its own comparison (`<2011-01-01`).
    #[must_use]
    pub fn created(filter: impl Into<String>) -> Self {
        Self::new("created", filter)
    }

    /// `forks:>=<n>`
    #[must_use]
    pub fn forks_at_least(n: u64) -> Self {
        Self::new("forks", format!(">={n}"))
    }

    /// `stars:>=<n>`
    #[must_use]
    pub fn stars_at_least(n: u64) -> Self {
        Self::new("stars", format!(">={n}"))
    }

    /// `license:<key>`
    #[must_use]
    pub fn license(key: impl Into<String>) -> Self {
        Self::new("license", key)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// The expression sent in the `q` parameter.
///
/// Parts are kept verbatim. `and` joins with a space, `plus` with a
/// literal `+`; both are percent-encoded on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    expression: String,
}

impl SearchQuery {
    /// Starts a query with a free-text keyword.
    #[must_use]
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            expression: keyword.into(),
        }
    }

    /// Starts a query with a single qualifier.
    #[must_use]
    pub fn qualifier(qualifier: &Qualifier) -> Self {
        Self {
            expression: qualifier.to_string(),
        }
    }

    /// Appends a qualifier separated by a space.
    #[must_use]
    pub fn and(self, qualifier: &Qualifier) -> Self {
        self.join(' ', qualifier)
    }

    /// Appends a qualifier separated by a literal `+`.
    #[must_use]
    pub fn plus(self, qualifier: &Qualifier) -> Self {
        self.join('+', qualifier)
    }

    fn join(mut self, sep: char, qualifier: &Qualifier) -> Self {
        if !self.expression.is_empty() {
            self.expression.push(sep);
        }
        self.expression.push_str(&qualifier.to_string());
        self
    }

    /// Returns the expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Returns true if the expression has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.trim().is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Field the results are sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Most recently updated.
    Updated,
    /// Fork count.
    Forks,
    /// Star count.
    Stars,
}

impl SortField {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Forks => "forks",
            Self::Stars => "stars",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Name of the parameter carrying the sort field.
///
/// The API only documents `sort`; `s` is sent verbatim when a case asks
/// for it and the API ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// `sort`
    Sort,
    /// `s`
    S,
}

impl SortKey {
    /// Returns the parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sort => "sort",
            Self::S => "s",
        }
    }
}

/// Name of the parameter carrying the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKey {
    /// `order`
    Order,
    /// `o`
    O,
}

impl OrderKey {
    /// Returns the parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::O => "o",
        }
    }
}

/// Query, sort and order for one search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// The `q` expression.
    pub query: SearchQuery,
    /// Sort parameter name and field.
    pub sort: Option<(SortKey, SortField)>,
    /// Order parameter name and direction.
    pub order: Option<(OrderKey, SortOrder)>,
}

impl SearchParams {
    /// Creates parameters with only a query.
    #[must_use]
    pub const fn new(query: SearchQuery) -> Self {
        Self {
            query,
            sort: None,
            order: None,
        }
    }

    /// Sets the sort field under the given parameter name.
    #[must_use]
    pub const fn sort(mut self, key: SortKey, field: SortField) -> Self {
        self.sort = Some((key, field));
        self
    }

    /// Sets the order under the given parameter name.
    #[must_use]
    pub const fn order(mut self, key: OrderKey, order: SortOrder) -> Self {
        self.order = Some((key, order));
        self
    }

    /// Converts to ordered query parameters: `q`, then sort, then order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query expression is empty.
    pub fn to_query_params(&self) -> DomainResult<QueryParams> {
        if self.query.is_empty() {
            return Err(DomainError::InvalidQuery(
                "search expression is empty".to_string(),
            ));
        }

        let mut params = QueryParams::new().with("q", self.query.as_str());
        if let Some((key, field)) = self.sort {
            params = params.with(key.as_str(), field.as_str());
        }
        if let Some((key, order)) = self.order {
            params = params.with(key.as_str(), order.as_str());
        }
        Ok(params)
    }
}
