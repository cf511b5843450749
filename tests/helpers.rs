//! Mock document backend for integration tests.

use std::sync::{Arc, LazyLock, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;

use doc_chat::api::HttpBackend;
use doc_chat::config::ClientConfig;
use doc_chat::service::chat_service::ChatService;

// Tracing is initialised once per test binary; set TEST_LOG to see output.
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

/// Canned reply for one endpoint.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(value: serde_json::Value) -> Self {
        Self { status: StatusCode::OK, body: value.to_string() }
    }

    pub fn status(status: StatusCode) -> Self {
        Self { status, body: String::new() }
    }

    pub fn raw(body: &str) -> Self {
        Self { status: StatusCode::OK, body: body.to_string() }
    }
}

#[derive(Clone)]
struct MockState {
    tables: Reply,
    query: Reply,
    queries: Arc<Mutex<Vec<serde_json::Value>>>,
}

pub struct MockBackend {
    pub address: String,
    queries: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl MockBackend {
    /// Request bodies received on `POST /query`, in arrival order.
    pub fn queries(&self) -> Vec<serde_json::Value> {
        self.queries.lock().unwrap().clone()
    }

    pub fn service(&self) -> ChatService<HttpBackend> {
        service_for(&self.address)
    }
}

pub fn service_for(address: &str) -> ChatService<HttpBackend> {
    let config = ClientConfig::new(address).expect("valid mock address");
    ChatService::new(HttpBackend::new(&config).expect("http client"))
}

async fn tables_handler(State(state): State<MockState>) -> impl IntoResponse {
    reply(&state.tables)
}

async fn query_handler(
    State(state): State<MockState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.queries.lock().unwrap().push(body);
    reply(&state.query)
}

fn reply(reply: &Reply) -> impl IntoResponse {
    (reply.status, [(header::CONTENT_TYPE, "application/json")], reply.body.clone())
}

pub async fn spawn_backend(tables: Reply, query: Reply) -> MockBackend {
    LazyLock::force(&TRACING);

    let queries = Arc::new(Mutex::new(Vec::new()));
    let state = MockState { tables, query, queries: queries.clone() };
    let app = Router::new()
        .route("/get_tables", get(tables_handler))
        .route("/query", post(query_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend { address: format!("http://{addr}"), queries }
}

/// An address nothing listens on.
pub async fn unreachable_address() -> String {
    LazyLock::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
