//! Reposcout Domain - Core types
//!
//! This crate defines the domain model for the repository search contract
//! suite. All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod expectation;
pub mod request;
pub mod response;
pub mod search;
pub mod testing;

pub use config::HarnessConfig;
pub use error::{DomainError, DomainResult};
pub use expectation::ResponseExpectation;
pub use testing::{
    Assertion, AssertionResult, ComparisonOperator, StatusExpectation, TestResults, TestSuite,
};
