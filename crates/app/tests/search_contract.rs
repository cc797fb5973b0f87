//! End-to-end runs of the search cases against a loopback stub.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use axum::http::Method;
use pretty_assertions::assert_eq;
use reposcout_application::{HarnessError, SearchCase, SearchHarness};
use reposcout_domain::HarnessConfig;
use reposcout_infrastructure::{ReqwestHttpClient, TestRunner, init_test_tracing};
use serde_json::json;

use common::{QueryPairs, SearchStub, StubReply, loopback_client, passing_page, q, spawn_stub};

fn harness(config: HarnessConfig) -> SearchHarness<ReqwestHttpClient, TestRunner> {
    SearchHarness::new(
        Arc::new(loopback_client()),
        Arc::new(TestRunner::new()),
        config,
    )
    .expect("valid config")
}

fn pairs(items: &[(&str, &str)]) -> QueryPairs {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

async fn passing_stub() -> SearchStub {
    spawn_stub(|_| StubReply::json(&passing_page(42))).await
}

#[tokio::test]
async fn every_case_sends_its_own_parameters() {
    init_test_tracing();
    let stub = passing_stub().await;

    let summary = harness(stub.config()).run_all().await;
    assert!(summary.all_passed(), "failures: {:?}", summary.failures().collect::<Vec<_>>());

    let sent: Vec<QueryPairs> = stub.requests().into_iter().map(|r| r.query).collect();
    let expected = vec![
        pairs(&[("q", "user:faran"), ("sort", "updated"), ("order", "desc")]),
        pairs(&[("q", "forks:>=10000"), ("s", "forks"), ("order", "desc")]),
        pairs(&[("q", "selenium+language:java"), ("s", "updated"), ("order", "desc")]),
        pairs(&[("q", "selenium+language:c++"), ("s", "updated"), ("order", "desc")]),
        pairs(&[("q", "selenium+language:javascript"), ("s", "updated"), ("order", "desc")]),
        pairs(&[
            ("q", "selenium+language:java created:<2011-01-01"),
            ("s", "updated"),
            ("order", "desc"),
        ]),
        pairs(&[
            ("q", "selenium+language:c++ created:<2011-01-01"),
            ("s", "updated"),
            ("order", "desc"),
        ]),
        pairs(&[
            ("q", "selenium+language:javascript created:<2011-01-01"),
            ("s", "updated"),
            ("order", "desc"),
        ]),
        pairs(&[("q", "stars:>=2000"), ("s", "stars"), ("o", "desc")]),
        pairs(&[("q", "license:apache-2.0"), ("s", "updated"), ("o", "desc")]),
    ];
    assert_eq!(sent, expected);
}

#[tokio::test]
async fn every_request_is_a_get_with_the_shared_headers() {
    let stub = passing_stub().await;
    let summary = harness(stub.config()).run_all().await;
    assert_eq!(summary.outcomes.len(), 10);

    for request in stub.requests() {
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.accept.as_deref(), Some("application/vnd.github+json"));
        assert!(
            request
                .user_agent
                .as_deref()
                .is_some_and(|ua| ua.starts_with("reposcout/"))
        );
    }
}

#[tokio::test]
async fn reports_carry_total_count_and_summary() {
    let stub = passing_stub().await;
    let harness = harness(stub.config());

    let report = harness.run_case(&SearchCase::ByUser).await.unwrap();
    assert_eq!(report.total_count, 42);
    assert_eq!(report.summary, "Total number of repos: 42 for user name: faran");
    assert_eq!(report.first_item.map(|r| r.full_name), Some("faran/selenium".to_string()));

    let report = harness.run_case(&SearchCase::MostStars).await.unwrap();
    assert_eq!(
        report.summary,
        "Most starred repositories: star count 31000 (faran/selenium)"
    );
}

#[tokio::test]
async fn forbidden_status_fails_the_shared_expectation() {
    let stub = spawn_stub(|_| StubReply {
        status: 403,
        content_type: "application/json",
        body: json!({ "message": "API rate limit exceeded" }).to_string(),
    })
    .await;

    let err = harness(stub.config())
        .run_case(&SearchCase::MostForks)
        .await
        .unwrap_err();
    match err {
        HarnessError::Expectation(results) => {
            assert_eq!(results.failed(), 1);
            assert!(results.failure_summary().contains("403"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn html_body_fails_the_shared_expectation() {
    let stub = spawn_stub(|_| StubReply {
        status: 200,
        content_type: "text/html",
        body: "<html></html>".to_string(),
    })
    .await;

    let summary = harness(stub.config()).run_all().await;
    assert_eq!(summary.passed(), 0);
    assert!(
        summary
            .outcomes
            .iter()
            .all(|o| matches!(o.result, Err(HarnessError::Expectation(_))))
    );
}

#[tokio::test]
async fn body_outside_the_contract_is_a_decode_failure() {
    let stub = spawn_stub(|_| StubReply::json(&json!({ "message": "unexpected" }))).await;

    let err = harness(stub.config())
        .run_case(&SearchCase::ApacheLicense)
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Decode(_)));
}

#[tokio::test]
async fn empty_pages_pass_every_case() {
    let stub = spawn_stub(|_| {
        StubReply::json(&json!({ "total_count": 0, "incomplete_results": false, "items": [] }))
    })
    .await;

    let summary = harness(stub.config()).run_all().await;
    assert!(summary.all_passed());
    let report = summary.outcomes[8].result.as_ref().unwrap();
    assert_eq!(report.summary, "Most starred repositories: no results");
}

#[tokio::test]
async fn a_failing_case_does_not_affect_the_others() {
    let stub = spawn_stub(|query| {
        let mut page = passing_page(7);
        if q(query).starts_with("license:") {
            page["items"][0]["license"] = json!({ "key": "mit", "spdx_id": "MIT" });
        }
        StubReply::json(&page)
    })
    .await;

    let summary = harness(stub.config()).run_all().await;
    assert_eq!(summary.passed(), 9);

    let failures: Vec<_> = summary.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].case, SearchCase::ApacheLicense);
    assert!(matches!(failures[0].result, Err(HarnessError::Assertion(_))));
}

#[tokio::test]
async fn one_language_failing_leaves_the_other_language_runs_passing() {
    let stub = spawn_stub(|query| {
        if q(query) == "selenium+language:c++" {
            StubReply {
                status: 500,
                content_type: "application/json",
                body: json!({ "message": "Server Error" }).to_string(),
            }
        } else {
            StubReply::json(&passing_page(3))
        }
    })
    .await;

    let summary = harness(stub.config()).run_all().await;
    let language_runs: Vec<_> = summary
        .outcomes
        .iter()
        .filter(|o| {
            matches!(
                o.case,
                SearchCase::ByLanguage(_) | SearchCase::ByLanguageCreatedBefore(_)
            )
        })
        .collect();
    assert_eq!(language_runs.len(), 6);

    let (failed, passed): (Vec<_>, Vec<_>) =
        language_runs.into_iter().partition(|o| o.result.is_err());
    assert_eq!(passed.len(), 5);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].case, SearchCase::ByLanguage("c++".to_string()));
    assert!(matches!(failed[0].result, Err(HarnessError::Expectation(_))));
    assert!(
        passed
            .iter()
            .any(|o| o.case == SearchCase::ByLanguageCreatedBefore("c++".to_string()))
    );
}

#[tokio::test]
async fn other_owner_fails_the_user_search() {
    let stub = spawn_stub(|_| {
        let mut page = passing_page(1);
        page["items"][0]["owner"]["login"] = json!("octocat");
        StubReply::json(&page)
    })
    .await;

    let err = harness(stub.config())
        .run_case(&SearchCase::ByUser)
        .await
        .unwrap_err();
    let HarnessError::Assertion(results) = err else {
        panic!("expected an assertion failure");
    };
    assert!(results.failure_summary().contains("octocat"));
}

#[tokio::test]
async fn configured_fixtures_drive_the_language_cases() {
    let stub = passing_stub().await;
    let config = HarnessConfig {
        username: "octocat".to_string(),
        created_before: "<2015-06-01".to_string(),
        languages: vec!["rust".to_string()],
        ..stub.config()
    };

    let summary = harness(config).run_all().await;
    assert_eq!(summary.outcomes.len(), 6);

    let queries: Vec<String> = stub
        .requests()
        .iter()
        .map(|r| q(&r.query).to_string())
        .collect();
    assert_eq!(
        queries,
        vec![
            "user:octocat",
            "forks:>=10000",
            "selenium+language:rust",
            "selenium+language:rust created:<2015-06-01",
            "stars:>=2000",
            "license:apache-2.0",
        ]
    );
}
