//! In-process stand-in for the booking backend, used by async tests.
//!
//! Routes are matched on method and path (relative to `/api`); the first
//! match wins and `once` routes are consumed. Unmatched requests get a 404.
//! Every request is recorded for later assertions.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use serde_json::Value;

use crate::api::ApiClient;
use crate::config::ClientConfig;

#[derive(Clone, Debug)]
pub(crate) struct MockRoute {
    method: Method,
    path: String,
    status: StatusCode,
    body: String,
    once: bool,
}

impl MockRoute {
    pub(crate) fn json(method: Method, path: &str, body: &Value) -> Self {
        Self {
            method,
            path: path.to_owned(),
            status: StatusCode::OK,
            body: body.to_string(),
            once: false,
        }
    }

    pub(crate) fn status(method: Method, path: &str, status: u16, body: &str) -> Self {
        Self {
            method,
            path: path.to_owned(),
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_owned(),
            once: false,
        }
    }

    pub(crate) fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<Vec<MockRoute>>,
    requests: Mutex<Vec<Recorded>>,
}

pub(crate) struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
    task: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub(crate) async fn start(routes: Vec<MockRoute>) -> Self {
        let state = Arc::new(MockState {
            routes: Mutex::new(routes),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}/api"),
            state,
            task,
        }
    }

    pub(crate) fn config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.base_url.clone(),
            payment_delay_ms: 0,
            ..ClientConfig::default()
        }
    }

    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).unwrap()
    }

    pub(crate) fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub(crate) fn requests_to(&self, method: &Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == *method && r.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_owned();
    let parsed = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_owned),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body: parsed,
    });

    let mut routes = state.routes.lock().unwrap();
    let Some(index) = routes.iter().position(|r| r.method == method && r.path == path) else {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "Not found".to_owned(),
        );
    };
    let route = if routes[index].once {
        routes.remove(index)
    } else {
        routes[index].clone()
    };
    (route.status, [(header::CONTENT_TYPE, "application/json")], route.body)
}

/// A base URL nothing is listening on.
pub(crate) fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub(crate) fn unreachable_client() -> ApiClient {
    let config = ClientConfig {
        api_base_url: unreachable_base_url(),
        ..ClientConfig::default()
    };
    ApiClient::new(&config).unwrap()
}
