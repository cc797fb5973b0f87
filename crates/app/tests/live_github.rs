//! Runs against the public search API.
//!
//! Ignored by default since it needs network access and is subject to the
//! unauthenticated rate limit. Run with `cargo test -- --ignored`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use reposcout_application::{SearchCase, SearchHarness};
use reposcout_domain::HarnessConfig;
use reposcout_infrastructure::{ReqwestHttpClient, TestRunner, init_test_tracing};
use tracing::warn;

fn live_harness() -> SearchHarness<ReqwestHttpClient, TestRunner> {
    init_test_tracing();
    SearchHarness::new(
        Arc::new(ReqwestHttpClient::new().expect("client")),
        Arc::new(TestRunner::new()),
        HarnessConfig::default(),
    )
    .expect("default config is valid")
}

async fn run_live(case: SearchCase) {
    let harness = live_harness();
    if let Err(e) = harness.run_case(&case).await {
        panic!("{case} failed: {e}");
    }
}

#[test]
fn fixture_list_matches_the_default_config() {
    assert_eq!(
        HarnessConfig::default().languages,
        vec!["java".to_string(), "c++".to_string(), "javascript".to_string()]
    );
}

#[tokio::test]
#[ignore = "requires network access to api.github.com"]
async fn live_search_by_user() {
    run_live(SearchCase::ByUser).await;
}

#[tokio::test]
#[ignore = "requires network access to api.github.com"]
async fn live_search_most_forks() {
    run_live(SearchCase::MostForks).await;
}

macro_rules! live_language_cases {
    ($($name:ident => $lang:literal),* $(,)?) => {
        mod by_language {
            use super::*;
            $(
                #[tokio::test]
                #[ignore = "requires network access to api.github.com"]
                async fn $name() {
                    run_live(SearchCase::ByLanguage($lang.to_string())).await;
                }
            )*
        }

        mod by_language_created_before {
            use super::*;
            $(
                #[tokio::test]
                #[ignore = "requires network access to api.github.com"]
                async fn $name() {
                    run_live(SearchCase::ByLanguageCreatedBefore($lang.to_string())).await;
                }
            )*
        }
    };
}

live_language_cases! {
    java => "java",
    cpp => "c++",
    javascript => "javascript",
}

#[tokio::test]
#[ignore = "requires network access to api.github.com"]
async fn live_search_most_stars() {
    run_live(SearchCase::MostStars).await;
}

#[tokio::test]
#[ignore = "requires network access to api.github.com"]
async fn live_search_apache_license() {
    run_live(SearchCase::ApacheLicense).await;
}

/// Repeating a search must succeed again. Counts may drift upward between
/// runs; a drop is only logged.
#[tokio::test]
#[ignore = "requires network access to api.github.com"]
async fn live_repeated_search_still_succeeds() {
    let harness = live_harness();
    let first = harness.run_case(&SearchCase::ByUser).await.unwrap();
    let second = harness.run_case(&SearchCase::ByUser).await.unwrap();
    if second.total_count < first.total_count {
        warn!(
            first = first.total_count,
            second = second.total_count,
            "total_count decreased between identical searches"
        );
    }
}
