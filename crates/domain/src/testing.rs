//! Checks evaluated against a captured response.
//!
//! An [`Assertion`] only describes what to look at; evaluation lives in the
//! infrastructure runner. Results are grouped per [`TestSuite`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One check on a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Status code matches.
    StatusCode {
        /// Accepted status codes.
        expected: StatusExpectation,
    },
    /// `Content-Type` has the given media type.
    ContentType {
        /// Media type essence, e.g. `application/json`.
        expected: String,
    },
    /// A header is present, optionally with an exact value.
    HeaderExists {
        /// Header name, matched case-insensitively.
        name: String,
        /// Required value.
        value: Option<String>,
    },
    /// Body parses as JSON.
    IsJson,
    /// A JSON path resolves, optionally to an exact value.
    JsonPath {
        /// Path such as `$.items[0].owner.login`.
        path: String,
        /// Required value.
        expected: Option<Value>,
    },
    /// The value at a JSON path compares against `value`.
    JsonPathMatches {
        /// Path to the compared value.
        path: String,
        /// How to compare.
        operator: ComparisonOperator,
        /// Right-hand side.
        value: Value,
    },
    /// Every element of the array at `path` satisfies a comparison at
    /// `item_path`, which is resolved against the element itself.
    EachItem {
        /// Path to an array.
        path: String,
        /// Path inside each element, rooted at `$`.
        item_path: String,
        /// How to compare.
        operator: ComparisonOperator,
        /// Right-hand side.
        value: Value,
    },
}

impl Assertion {
    /// `path` must resolve to `expected`.
    #[must_use]
    pub fn json_equals(path: impl Into<String>, expected: Value) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: Some(expected),
        }
    }

    /// `path` must resolve to anything, `null` included.
    #[must_use]
    pub fn json_exists(path: impl Into<String>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: None,
        }
    }

    /// Short description used when a failure carries no message.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("status {expected}"),
            Self::ContentType { expected } => format!("content type {expected}"),
            Self::HeaderExists { name, value } => value.as_ref().map_or_else(
                || format!("header {name} present"),
                |v| format!("header {name} = {v}"),
            ),
            Self::IsJson => "body is JSON".to_string(),
            Self::JsonPath { path, expected } => expected.as_ref().map_or_else(
                || format!("{path} present"),
                |v| format!("{path} == {v}"),
            ),
            Self::JsonPathMatches {
                path,
                operator,
                value,
            } => format!("{path} {operator} {value}"),
            Self::EachItem {
                path,
                item_path,
                operator,
                value,
            } => format!("every {path}: {item_path} {operator} {value}"),
        }
    }
}

/// Accepted status codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// A single code.
    Exact(u16),
    /// An inclusive range.
    Range {
        /// Lowest accepted code.
        min: u16,
        /// Highest accepted code.
        max: u16,
    },
    /// Any code of the list.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Any 2xx code.
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Exactly `code`.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Returns true if `status` is accepted.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(code) => status == *code,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Range { min, max } => write!(f, "{min}..={max}"),
            Self::OneOf(codes) => {
                let codes: Vec<String> = codes.iter().map(u16::to_string).collect();
                write!(f, "one of [{}]", codes.join(", "))
            }
        }
    }
}

/// Comparison applied by [`Assertion::JsonPathMatches`] and
/// [`Assertion::EachItem`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
    /// `>` (numbers only)
    GreaterThan,
    /// `>=` (numbers only)
    GreaterThanOrEqual,
    /// `<` (numbers only)
    LessThan,
    /// `<=` (numbers only)
    LessThanOrEqual,
    /// Substring of a string, or element of an array.
    Contains,
    /// String matches a regular expression.
    Matches,
}

impl ComparisonOperator {
    /// Operator as written in descriptions.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Contains => "contains",
            Self::Matches => "matches",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Outcome of one assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The evaluated assertion.
    pub assertion: Assertion,
    /// Value observed in the response, rendered for display.
    pub actual: Option<String>,
    /// Expected-vs-actual message; `None` when the assertion held.
    pub error: Option<String>,
}

impl AssertionResult {
    /// The assertion held.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            actual: None,
            error: None,
        }
    }

    /// The assertion held on `actual`.
    #[must_use]
    pub fn observed(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// The assertion could not be evaluated or the value was absent.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// The assertion did not hold on `actual`.
    #[must_use]
    pub fn mismatch(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }

    /// Returns true if the assertion held.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Named, ordered group of assertions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite name, reported with its results.
    pub name: String,
    /// Assertions in evaluation order.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Skip the remaining assertions after the first failure.
    #[serde(default)]
    pub stop_on_failure: bool,
}

impl TestSuite {
    /// Empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends an assertion.
    pub fn add(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    /// Appends an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.add(assertion);
        self
    }

    /// Stops at the first failure (builder pattern).
    #[must_use]
    pub const fn stopping_on_failure(mut self) -> Self {
        self.stop_on_failure = true;
        self
    }

    /// Returns true if the suite holds no assertions.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Number of assertions.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }
}

/// Results of one suite evaluation.
///
/// A suite stopped early holds fewer results than assertions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    /// Name of the evaluated suite.
    pub suite_name: String,
    /// One result per evaluated assertion.
    pub results: Vec<AssertionResult>,
    /// Evaluation time.
    pub elapsed: Duration,
}

impl TestResults {
    /// Groups results under a suite name.
    #[must_use]
    pub fn new(suite_name: impl Into<String>, results: Vec<AssertionResult>, elapsed: Duration) -> Self {
        Self {
            suite_name: suite_name.into(),
            results,
            elapsed,
        }
    }

    /// Number of evaluated assertions.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of assertions that held.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Number of assertions that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(AssertionResult::passed)
    }

    /// Failed results, in evaluation order.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Failure messages joined with `; `.
    #[must_use]
    pub fn failure_summary(&self) -> String {
        self.failures()
            .map(|r| {
                r.error
                    .clone()
                    .unwrap_or_else(|| r.assertion.description())
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
