//! Search harness
//!
//! Runs search cases against the shared request template and response
//! expectation. Cases run one at a time; a failing case never affects the
//! next one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reposcout_domain::{
    DomainError, HarnessConfig, ResponseExpectation, TestResults,
    request::RequestTemplate,
    search::{Repository, SearchResponse},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::cases::SearchCase;
use crate::error::ApplicationError;
use crate::execute_request::{ExecuteRequest, ExecuteRequestError};
use crate::ports::{HttpClient, ResponseChecker};

/// Why a single case failed.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The harness configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(#[from] DomainError),

    /// The request could not be built.
    #[error("could not build request: {0}")]
    Build(#[from] ApplicationError),

    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Transport(#[from] ExecuteRequestError),

    /// Status or content type did not match the shared expectation.
    #[error("response expectation failed: {}", .0.failure_summary())]
    Expectation(TestResults),

    /// The body did not decode as a search response, e.g. `total_count`
    /// or `items` is missing.
    #[error("body does not match the search contract: {0}")]
    Decode(#[from] serde_json::Error),

    /// A case-specific assertion failed.
    #[error("assertion failed: {}", .0.failure_summary())]
    Assertion(TestResults),
}

/// What a passing case observed.
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// `total_count` of the response.
    pub total_count: u64,
    /// First item of the page, if any.
    pub first_item: Option<Repository>,
    /// Case-specific assertion results.
    pub results: TestResults,
    /// Informational line that was logged.
    pub summary: String,
}

/// A case together with its result.
#[derive(Debug)]
pub struct CaseOutcome {
    /// The case that ran.
    pub case: SearchCase,
    /// Its report or failure.
    pub result: Result<CaseReport, HarnessError>,
}

impl CaseOutcome {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a full run, in run order.
#[derive(Debug)]
pub struct RunSummary {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// One outcome per case.
    pub outcomes: Vec<CaseOutcome>,
}

impl RunSummary {
    /// Number of passing cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of failing cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Returns true if every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Failing outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

/// Runs search cases with a shared template and expectation.
pub struct SearchHarness<C: HttpClient, R: ResponseChecker> {
    executor: ExecuteRequest<C>,
    checker: Arc<R>,
    config: HarnessConfig,
    template: RequestTemplate,
    expectation: ResponseExpectation,
}

impl<C: HttpClient, R: ResponseChecker> SearchHarness<C, R> {
    /// Validates `config` and builds the shared templates once.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Config` if the configuration is invalid.
    pub fn new(
        client: Arc<C>,
        checker: Arc<R>,
        config: HarnessConfig,
    ) -> Result<Self, HarnessError> {
        config.validate()?;
        let template = config.request_template();
        Ok(Self {
            executor: ExecuteRequest::new(client),
            checker,
            config,
            template,
            expectation: ResponseExpectation::json_ok(),
        })
    }

    /// The configuration the harness was built with.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The shared request template.
    #[must_use]
    pub const fn template(&self) -> &RequestTemplate {
        &self.template
    }

    /// The shared response expectation.
    #[must_use]
    pub const fn expectation(&self) -> &ResponseExpectation {
        &self.expectation
    }

    /// Every case of the catalog for this configuration.
    #[must_use]
    pub fn cases(&self) -> Vec<SearchCase> {
        SearchCase::catalog(&self.config)
    }

    /// Runs one case.
    ///
    /// The shared expectation is checked first; case-specific assertions
    /// only run when it passed.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the case.
    pub async fn run_case(&self, case: &SearchCase) -> Result<CaseReport, HarnessError> {
        let request = case.request(&self.template, &self.config)?;
        let response = self.executor.execute(&request).await?;

        let shared = self.checker.check(&self.expectation.to_suite(), &response);
        if !shared.all_passed() {
            return Err(HarnessError::Expectation(shared));
        }

        let decoded = SearchResponse::from_json(&response.body)?;

        let results = self
            .checker
            .check(&case.suite(&self.config, &decoded), &response);
        if !results.all_passed() {
            return Err(HarnessError::Assertion(results));
        }

        let summary = case.summary(&self.config, &decoded);
        info!(case = %case, total_count = decoded.total_count, "{summary}");

        Ok(CaseReport {
            name: case.name(),
            total_count: decoded.total_count,
            first_item: decoded.items.into_iter().next(),
            results,
            summary,
        })
    }

    /// Runs every case of the catalog in order.
    pub async fn run_all(&self) -> RunSummary {
        let started_at = Utc::now();
        let mut outcomes = Vec::new();

        for case in self.cases() {
            let result = self.run_case(&case).await;
            if let Err(e) = &result {
                warn!(case = %case, error = %e, "case failed");
            }
            outcomes.push(CaseOutcome { case, result });
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        info!(
            passed = summary.passed(),
            failed = summary.failed(),
            "search run finished"
        );
        summary
    }
}
