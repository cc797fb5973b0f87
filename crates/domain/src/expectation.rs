//! Shared response expectation applied before any case-specific check.

use serde::{Deserialize, Serialize};

use crate::testing::{Assertion, StatusExpectation, TestSuite};

/// Expected status and content type every response must satisfy.
///
/// Built once and reused by reference for every case. A response that
/// violates it fails its case before case-specific assertions run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseExpectation {
    /// Expected status code.
    pub status: StatusExpectation,
    /// Expected media type essence.
    pub content_type: String,
}

impl ResponseExpectation {
    /// Status 200 with a JSON body.
    #[must_use]
    pub fn json_ok() -> Self {
        Self {
            status: StatusExpectation::exact(200),
            content_type: mime::APPLICATION_JSON.essence_str().to_string(),
        }
    }

    /// Expands the expectation into a suite that stops at the first failure.
    #[must_use]
    pub fn to_suite(&self) -> TestSuite {
        TestSuite::new("Response expectation")
            .with_assertion(Assertion::StatusCode {
                expected: self.status.clone(),
            })
            .with_assertion(Assertion::ContentType {
                expected: self.content_type.clone(),
            })
            .stopping_on_failure()
    }
}

impl Default for ResponseExpectation {
    fn default() -> Self {
        Self::json_ok()
    }
}
