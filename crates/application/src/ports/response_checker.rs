//! Response checker port

use reposcout_domain::{TestResults, TestSuite, response::ResponseSpec};

/// Port for evaluating a suite of assertions against a response.
pub trait ResponseChecker: Send + Sync {
    /// Runs every assertion of `suite` against `response`.
    fn check(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults;
}
