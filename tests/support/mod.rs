// In-process stand-in for the EventLink backend
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use eventlink::client::services::api_client::ApiClient;
use eventlink::client::services::session::Session;
use eventlink::client::utils::credential_store::{MemoryStore, TokenAccessor};

pub const TOKEN: &str = "test-token-123";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<(String, String), Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockBackend {
    pub base_url: String,
    shared: Arc<Shared>,
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    shared.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let canned = shared.routes.lock().unwrap().get(&(method.to_string(), path)).cloned();
    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(canned.status).unwrap();
            (status, Json(canned.body)).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no mock").into_response(),
    }
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let router = Router::new().fallback(handle).with_state(shared.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        MockBackend { base_url: format!("http://{}", addr), shared }
    }

    pub fn mock(&self, method: &str, path: &str, status: u16, body: Value) {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), Canned { status, body, delay: None });
    }

    pub fn mock_delayed(&self, method: &str, path: &str, body: Value, delay: Duration) {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), Canned { status: 200, body, delay: Some(delay) });
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.method == method && r.path == path).collect()
    }

    /// Session against this backend, signed in with [`TOKEN`] unless `signed_in` is false.
    pub fn session(&self, signed_in: bool) -> Arc<Session> {
        let store = if signed_in { MemoryStore::with_token(TOKEN) } else { MemoryStore::new() };
        let tokens = TokenAccessor::new(Arc::new(store));
        Arc::new(Session::new(ApiClient::new(self.base_url.clone(), tokens)))
    }
}
