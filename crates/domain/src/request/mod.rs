//! HTTP Request domain types

mod header;
mod query;
mod spec;

pub use header::{Header, Headers};
pub use query::{QueryParam, QueryParams};
pub use spec::{DEFAULT_BASE_URL, GITHUB_JSON_ACCEPT, RequestSpec, RequestTemplate};
