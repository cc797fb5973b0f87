//! Reposcout Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The search case catalog and the harness that runs it
//! - Application-level error handling

pub mod cases;
pub mod error;
pub mod execute_request;
pub mod harness;
pub mod ports;

pub use cases::SearchCase;
pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use harness::{CaseOutcome, CaseReport, HarnessError, RunSummary, SearchHarness};
pub use ports::{HttpClient, HttpClientError, ResponseChecker};
