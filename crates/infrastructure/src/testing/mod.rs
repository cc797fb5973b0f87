//! Response testing infrastructure.
//!
//! The runner evaluates assertion suites; `json_path` resolves the paths
//! they reference.

mod json_path;
mod runner;

pub use json_path::{JsonPath, PathError};
pub use runner::TestRunner;
