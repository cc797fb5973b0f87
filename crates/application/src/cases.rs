//! Search case catalog
//!
//! Each case is one GET against the repository search endpoint with its own
//! query parameters and case-specific assertions.

use std::fmt;

use reposcout_domain::{
    Assertion, ComparisonOperator, HarnessConfig, TestSuite,
    request::{RequestSpec, RequestTemplate},
    search::{
        OrderKey, Qualifier, SEARCH_REPOSITORIES_PATH, SearchParams, SearchQuery, SearchResponse,
        SortField, SortKey, SortOrder,
    },
};
use serde_json::json;

use crate::{ApplicationError, ApplicationResult};

/// Fork threshold of the most-forked search.
pub const MIN_FORKS: u64 = 10_000;

/// Star threshold of the most-starred search.
pub const MIN_STARS: u64 = 2000;

/// License key of the license search.
pub const LICENSE_KEY: &str = "apache-2.0";

/// Free-text keyword combined with each language fixture.
pub const LANGUAGE_KEYWORD: &str = "selenium";

/// One search request configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCase {
    /// Repositories of the configured user, most recently updated first.
    ByUser,
    /// Repositories with at least `MIN_FORKS` forks.
    MostForks,
    /// Keyword search restricted to one language fixture.
    ByLanguage(String),
    /// Like `ByLanguage`, also filtered by the configured creation date.
    ByLanguageCreatedBefore(String),
    /// Repositories with at least `MIN_STARS` stars.
    MostStars,
    /// Repositories licensed under `LICENSE_KEY`.
    ApacheLicense,
}

impl SearchCase {
    /// Returns every case in run order: the two fixed cases, both language
    /// cases once per fixture, then the remaining fixed cases.
    #[must_use]
    pub fn catalog(config: &HarnessConfig) -> Vec<Self> {
        let mut cases = vec![Self::ByUser, Self::MostForks];
        cases.extend(config.languages.iter().cloned().map(Self::ByLanguage));
        cases.extend(
            config
                .languages
                .iter()
                .cloned()
                .map(Self::ByLanguageCreatedBefore),
        );
        cases.push(Self::MostStars);
        cases.push(Self::ApacheLicense);
        cases
    }

    /// Stable name used in logs and reports.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::ByUser => "search_by_user".to_string(),
            Self::MostForks => "search_most_forks".to_string(),
            Self::ByLanguage(lang) => format!("search_by_language[{lang}]"),
            Self::ByLanguageCreatedBefore(lang) => {
                format!("search_by_language_created_before[{lang}]")
            }
            Self::MostStars => "search_most_stars".to_string(),
            Self::ApacheLicense => "search_apache_license".to_string(),
        }
    }

    /// Query, sort and order for this case.
    ///
    /// Parameter names differ between cases (`sort`/`s`, `order`/`o`) and
    /// are sent exactly as listed here.
    #[must_use]
    pub fn params(&self, config: &HarnessConfig) -> SearchParams {
        match self {
            Self::ByUser => {
                SearchParams::new(SearchQuery::qualifier(&Qualifier::user(&config.username)))
                    .sort(SortKey::Sort, SortField::Updated)
                    .order(OrderKey::Order, SortOrder::Desc)
            }
            Self::MostForks => {
                SearchParams::new(SearchQuery::qualifier(&Qualifier::forks_at_least(MIN_FORKS)))
                    .sort(SortKey::S, SortField::Forks)
                    .order(OrderKey::Order, SortOrder::Desc)
            }
            Self::ByLanguage(lang) => SearchParams::new(
                SearchQuery::keyword(LANGUAGE_KEYWORD).plus(&Qualifier::language(lang)),
            )
            .sort(SortKey::S, SortField::Updated)
            .order(OrderKey::Order, SortOrder::Desc),
            Self::ByLanguageCreatedBefore(lang) => SearchParams::new(
                SearchQuery::keyword(LANGUAGE_KEYWORD)
                    .plus(&Qualifier::language(lang))
                    .and(&Qualifier::created(&config.created_before)),
            )
            .sort(SortKey::S, SortField::Updated)
            .order(OrderKey::Order, SortOrder::Desc),
            Self::MostStars => {
                SearchParams::new(SearchQuery::qualifier(&Qualifier::stars_at_least(MIN_STARS)))
                    .sort(SortKey::S, SortField::Stars)
                    .order(OrderKey::O, SortOrder::Desc)
            }
            Self::ApacheLicense => {
                SearchParams::new(SearchQuery::qualifier(&Qualifier::license(LICENSE_KEY)))
                    .sort(SortKey::S, SortField::Updated)
                    .order(OrderKey::O, SortOrder::Desc)
            }
        }
    }

    /// Builds the request from the shared template.
    ///
    /// # Errors
    ///
    /// Returns an error if the query parameters are invalid.
    pub fn request(
        &self,
        template: &RequestTemplate,
        config: &HarnessConfig,
    ) -> ApplicationResult<RequestSpec> {
        let query = self
            .params(config)
            .to_query_params()
            .map_err(|source| ApplicationError::Request {
                case: self.name(),
                source,
            })?;
        Ok(template.get(self.name(), SEARCH_REPOSITORIES_PATH, query))
    }

    /// Case-specific assertions, run after the shared expectation passed.
    ///
    /// The contract fields (`total_count`, `items`) are already enforced by
    /// decoding. Checks on the first item are only added when the page is
    /// non-empty, so a case may get an empty suite.
    #[must_use]
    pub fn suite(&self, config: &HarnessConfig, decoded: &SearchResponse) -> TestSuite {
        let mut suite = TestSuite::new(self.name());
        match self {
            Self::ByUser if !decoded.is_empty() => {
                suite.add(Assertion::json_equals(
                    "$.items[0].owner.login",
                    json!(config.username),
                ));
            }
            Self::MostStars if !decoded.is_empty() => {
                suite.add(Assertion::JsonPathMatches {
                    path: "$.items[0].stargazers_count".to_string(),
                    operator: ComparisonOperator::GreaterThanOrEqual,
                    value: json!(MIN_STARS),
                });
            }
            Self::ApacheLicense => {
                suite.add(Assertion::EachItem {
                    path: "$.items".to_string(),
                    item_path: "$.license.key".to_string(),
                    operator: ComparisonOperator::Equals,
                    value: json!(LICENSE_KEY),
                });
            }
            _ => {}
        }
        suite
    }

    /// Informational line logged after the case passed.
    #[must_use]
    pub fn summary(&self, config: &HarnessConfig, decoded: &SearchResponse) -> String {
        let total = decoded.total_count;
        match self {
            Self::ByUser => format!(
                "Total number of repos: {total} for user name: {}",
                config.username
            ),
            Self::MostForks => {
                format!("Total number of repos: {total} with forks greater than {MIN_FORKS}")
            }
            Self::ByLanguage(lang) => {
                format!("Total number of repos: {total} for language: {lang}")
            }
            Self::ByLanguageCreatedBefore(lang) => format!(
                "Total number of repos: {total} for language: {lang} created: {}",
                config.created_before
            ),
            Self::MostStars => decoded.first().map_or_else(
                || "Most starred repositories: no results".to_string(),
                |repo| {
                    format!(
                        "Most starred repositories: star count {} ({})",
                        repo.stargazers_count, repo.full_name
                    )
                },
            ),
            Self::ApacheLicense => {
                format!("Total number of repos licensed under Apache-2.0: {total}")
            }
        }
    }
}

impl fmt::Display for SearchCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
