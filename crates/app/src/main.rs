//! Reposcout - Main Entry Point
//!
//! Runs every search case once against the configured API and exits
//! non-zero if any case failed.
//!
//! Usage: `reposcout [CONFIG.yaml]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use reposcout_application::SearchHarness;
use reposcout_domain::HarnessConfig;
use reposcout_infrastructure::{ReqwestHttpClient, TestRunner, init_tracing, load_config};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "reposcout aborted");
            ExitCode::from(2)
        }
    }
}

async fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "using config file");
            load_config(&path).await?
        }
        None => HarnessConfig::default(),
    };

    let client = Arc::new(ReqwestHttpClient::new()?);
    let harness = SearchHarness::new(client, Arc::new(TestRunner::new()), config)?;

    let summary = harness.run_all().await;
    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(report) => println!("PASS {}  {}", report.name, report.summary),
            Err(e) => println!("FAIL {}  {e}", outcome.case),
        }
    }
    println!(
        "{} passed, {} failed in {} ms",
        summary.passed(),
        summary.failed(),
        (summary.finished_at - summary.started_at).num_milliseconds()
    );

    Ok(summary.all_passed())
}
