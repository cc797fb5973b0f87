//! Stub search API served on a loopback port.

#![allow(dead_code, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use reposcout_domain::HarnessConfig;
use reposcout_infrastructure::ReqwestHttpClient;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Decoded query pairs of one request, in wire order.
pub type QueryPairs = Vec<(String, String)>;

/// What the stub answers for one request.
#[derive(Clone, Debug)]
pub struct StubReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl StubReply {
    pub fn json(body: &Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json; charset=utf-8",
            body: body.to_string(),
        }
    }
}

/// One recorded request.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub query: QueryPairs,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

type Responder = Arc<dyn Fn(&QueryPairs) -> StubReply + Send + Sync>;

#[derive(Clone)]
struct StubState {
    responder: Responder,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Handle for the running stub; shuts the server down on drop.
pub struct SearchStub {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl SearchStub {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Default configuration pointed at the stub.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            base_url: self.base_url.clone(),
            ..HarnessConfig::default()
        }
    }
}

impl Drop for SearchStub {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn handle_search(
    State(state): State<StubState>,
    method: Method,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(RecordedRequest {
            method,
            query: query.clone(),
            accept: value(header::ACCEPT),
            user_agent: value(header::USER_AGENT),
        });
    }

    let reply = (state.responder)(&query);
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, reply.content_type)], reply.body)
}

/// Starts a stub that answers every search with `responder`.
pub async fn spawn_stub<F>(responder: F) -> SearchStub
where
    F: Fn(&QueryPairs) -> StubReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("stub bind");
    let addr = listener.local_addr().expect("stub addr");

    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        responder: Arc::new(responder),
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/search/repositories", get(handle_search))
        .with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    SearchStub {
        base_url: format!("http://{addr}"),
        shutdown: Some(shutdown_tx),
        requests,
    }
}

/// Client that ignores proxy settings from the environment.
pub fn loopback_client() -> ReqwestHttpClient {
    let client = reqwest::Client::builder()
        .no_proxy()
        .user_agent(reposcout_infrastructure::USER_AGENT)
        .build()
        .expect("client");
    ReqwestHttpClient::with_client(client)
}

/// The `q` value of a request.
pub fn q(query: &QueryPairs) -> &str {
    query
        .iter()
        .find(|(k, _)| k == "q")
        .map_or("", |(_, v)| v.as_str())
}

/// A page that satisfies every case-specific assertion.
pub fn passing_page(total_count: u64) -> Value {
    json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": [
            {
                "id": 1,
                "name": "selenium",
                "full_name": "faran/selenium",
                "owner": { "login": "faran" },
                "stargazers_count": 31000,
                "forks_count": 12000,
                "language": "Java",
                "license": { "key": "apache-2.0", "spdx_id": "Apache-2.0" },
                "created_at": "2010-05-01T00:00:00Z",
                "updated_at": "2026-10-01T00:00:00Z"
            }
        ]
    })
}
