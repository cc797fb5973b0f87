//! Reposcout Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading
//! and logging setup for the binary.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod testing;

pub use adapters::{ReqwestHttpClient, USER_AGENT};
pub use config::{ConfigError, from_yaml_str, load_config};
pub use logging::{DEFAULT_LOG_FILTER, init_test_tracing, init_tracing};
pub use testing::TestRunner;
