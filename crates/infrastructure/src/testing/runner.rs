//! Evaluates test suites against captured responses.

use std::cell::OnceCell;
use std::time::Instant;

use regex::Regex;
use reposcout_application::ports::ResponseChecker;
use reposcout_domain::response::ResponseSpec;
use reposcout_domain::testing::{
    Assertion, AssertionResult, ComparisonOperator, StatusExpectation, TestResults, TestSuite,
};
use serde_json::Value;
use tracing::debug;

use super::json_path::JsonPath;

/// Runs assertions against responses.
///
/// Stateless apart from the stop-on-failure switch, so one runner can be
/// shared by every case.
#[derive(Debug, Default)]
pub struct TestRunner {
    stop_on_failure: bool,
}

impl TestRunner {
    /// Runner that evaluates every assertion unless a suite asks to stop.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Stops every suite at its first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Evaluates `suite` against `response`.
    #[must_use]
    pub fn run(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let started = Instant::now();
        let eval = Evaluation::new(response);
        let stop = self.stop_on_failure || suite.stop_on_failure;

        let mut results = Vec::with_capacity(suite.len());
        for assertion in &suite.assertions {
            let result = eval.check(assertion);
            debug!(
                suite = %suite.name,
                assertion = %assertion.description(),
                passed = result.passed(),
                "assertion evaluated"
            );
            let failed = !result.passed();
            results.push(result);
            if failed && stop {
                break;
            }
        }

        TestResults::new(&suite.name, results, started.elapsed())
    }

    /// Evaluates a single assertion.
    #[must_use]
    pub fn run_assertion(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        Evaluation::new(response).check(assertion)
    }
}

impl ResponseChecker for TestRunner {
    fn check(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        self.run(suite, response)
    }
}

/// One response under evaluation. The body is parsed at most once.
struct Evaluation<'a> {
    response: &'a ResponseSpec,
    body: OnceCell<Result<Value, String>>,
}

impl<'a> Evaluation<'a> {
    const fn new(response: &'a ResponseSpec) -> Self {
        Self {
            response,
            body: OnceCell::new(),
        }
    }

    fn json(&self) -> Result<&Value, &str> {
        self.body
            .get_or_init(|| serde_json::from_str(&self.response.body).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(String::as_str)
    }

    fn check(&self, assertion: &Assertion) -> AssertionResult {
        let a = assertion.clone();
        match assertion {
            Assertion::StatusCode { expected } => self.status(a, expected),
            Assertion::ContentType { expected } => self.content_type(a, expected),
            Assertion::HeaderExists { name, value } => self.header(a, name, value.as_deref()),
            Assertion::IsJson => match self.json() {
                Ok(_) => AssertionResult::pass(a),
                Err(e) => AssertionResult::fail(a, format!("Body is not valid JSON: {e}")),
            },
            Assertion::JsonPath { path, expected } => {
                self.with_value(a, path, |a, value| match expected {
                    Some(expected) if value != expected => AssertionResult::mismatch(
                        a,
                        value.to_string(),
                        format!(
                            "JSON path '{path}' value mismatch: expected {expected}, got {value}"
                        ),
                    ),
                    _ => AssertionResult::observed(a, value.to_string()),
                })
            }
            Assertion::JsonPathMatches {
                path,
                operator,
                value: rhs,
            } => self.with_value(a, path, |a, value| {
                if compare(value, *operator, rhs) {
                    AssertionResult::observed(a, value.to_string())
                } else {
                    AssertionResult::mismatch(
                        a,
                        value.to_string(),
                        format!("JSON path '{path}': expected {operator} {rhs}, got {value}"),
                    )
                }
            }),
            Assertion::EachItem {
                path,
                item_path,
                operator,
                value,
            } => self.each_item(a, path, item_path, *operator, value),
        }
    }

    fn status(&self, a: Assertion, expected: &StatusExpectation) -> AssertionResult {
        let actual = self.response.status;
        if expected.matches(actual) {
            AssertionResult::observed(a, actual.to_string())
        } else {
            AssertionResult::mismatch(
                a,
                actual.to_string(),
                format!(
                    "Expected status {expected}, got {}",
                    self.response.status_code()
                ),
            )
        }
    }

    /// Compares media type essences; `application/json` also accepts a
    /// `+json` suffix. Unparseable values fall back to a substring match.
    fn content_type(&self, a: Assertion, expected: &str) -> AssertionResult {
        let Some(actual) = self.response.content_type.as_deref() else {
            return AssertionResult::fail(a, "No Content-Type header present");
        };

        let matches = match (actual.parse::<mime::Mime>(), expected.parse::<mime::Mime>()) {
            (Ok(got), Ok(want)) => {
                got.essence_str() == want.essence_str()
                    || (want == mime::APPLICATION_JSON && got.suffix() == Some(mime::JSON))
            }
            _ => actual.contains(expected),
        };

        if matches {
            AssertionResult::observed(a, actual)
        } else {
            AssertionResult::mismatch(
                a,
                actual,
                format!("Expected Content-Type '{expected}', got '{actual}'"),
            )
        }
    }

    fn header(&self, a: Assertion, name: &str, expected: Option<&str>) -> AssertionResult {
        let Some(actual) = self.response.get_header(name) else {
            return AssertionResult::fail(a, format!("Header '{name}' not found"));
        };
        match expected {
            Some(expected) if actual != expected => AssertionResult::mismatch(
                a,
                actual.as_str(),
                format!("Header '{name}': expected '{expected}', got '{actual}'"),
            ),
            _ => AssertionResult::observed(a, actual.as_str()),
        }
    }

    /// Parses the body and resolves `path`, handing the value to `then`.
    fn with_value<F>(&self, a: Assertion, path: &str, then: F) -> AssertionResult
    where
        F: FnOnce(Assertion, &Value) -> AssertionResult,
    {
        let parsed = match JsonPath::parse(path) {
            Ok(parsed) => parsed,
            Err(e) => return AssertionResult::fail(a, format!("Invalid JSON path '{path}': {e}")),
        };
        let root = match self.json() {
            Ok(root) => root,
            Err(e) => {
                return AssertionResult::fail(a, format!("Failed to parse body as JSON: {e}"));
            }
        };
        match parsed.resolve(root) {
            Some(value) => then(a, value),
            None => AssertionResult::fail(a, format!("JSON path '{path}' not found")),
        }
    }

    fn each_item(
        &self,
        a: Assertion,
        path: &str,
        item_path: &str,
        operator: ComparisonOperator,
        rhs: &Value,
    ) -> AssertionResult {
        let item = match JsonPath::parse(item_path) {
            Ok(item) => item,
            Err(e) => {
                return AssertionResult::fail(a, format!("Invalid JSON path '{item_path}': {e}"));
            }
        };

        self.with_value(a, path, |a, value| {
            let Some(items) = value.as_array() else {
                return AssertionResult::mismatch(
                    a,
                    value.to_string(),
                    format!("JSON path '{path}' is not an array"),
                );
            };

            let offender = items.iter().enumerate().find_map(|(index, element)| {
                let actual = item.resolve(element);
                if actual.is_some_and(|v| compare(v, operator, rhs)) {
                    None
                } else {
                    Some((index, actual.map_or_else(|| "missing".to_string(), Value::to_string)))
                }
            });

            match offender {
                None => AssertionResult::observed(a, format!("{} items", items.len())),
                Some((index, shown)) => {
                    let error = format!(
                        "{path}[{index}] {item_path}: expected {operator} {rhs}, got {shown}"
                    );
                    AssertionResult::mismatch(a, shown, error)
                }
            }
        })
    }
}

fn compare(actual: &Value, operator: ComparisonOperator, expected: &Value) -> bool {
    let numbers = || actual.as_f64().zip(expected.as_f64());
    match operator {
        ComparisonOperator::Equals => actual == expected,
        ComparisonOperator::NotEquals => actual != expected,
        ComparisonOperator::GreaterThan => numbers().is_some_and(|(a, b)| a > b),
        ComparisonOperator::GreaterThanOrEqual => numbers().is_some_and(|(a, b)| a >= b),
        ComparisonOperator::LessThan => numbers().is_some_and(|(a, b)| a < b),
        ComparisonOperator::LessThanOrEqual => numbers().is_some_and(|(a, b)| a <= b),
        ComparisonOperator::Contains => match (actual, expected) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::Array(items), _) => items.contains(expected),
            _ => false,
        },
        ComparisonOperator::Matches => match (actual, expected) {
            (Value::String(s), Value::String(pattern)) => {
                Regex::new(pattern).is_ok_and(|re| re.is_match(s))
            }
            _ => false,
        },
    }
}
