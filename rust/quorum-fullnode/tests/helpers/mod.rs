use std::{collections::HashMap, net::TcpListener, sync::Arc};

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Json, Router, Server,
};
use serde_json::{json, Value};
use tokio::{sync::Mutex, task::JoinHandle};
use url::Url;

/// One request as observed by the mock node
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<HashMap<String, (StatusCode, Value)>>,
}

/// A stand-in FullNode: an axum server bound to an ephemeral loopback port
/// that records every request and replies with canned JSON per path
pub struct MockNode {
    state: Arc<MockState>,
    api_base: Url,
    server: JoinHandle<()>,
}

impl MockNode {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .fallback(handle)
            .layer(Extension(state.clone()));

        let server = tokio::spawn(async move {
            Server::from_tcp(listener)
                .unwrap()
                .serve(app.into_make_service())
                .await
                .unwrap();
        });

        MockNode {
            state,
            api_base: Url::parse(&format!("http://{address}")).unwrap(),
            server,
        }
    }

    pub fn api_base(&self) -> Url {
        self.api_base.clone()
    }

    pub async fn respond_with(&self, path: &str, body: Value) {
        self.respond_with_status(path, StatusCode::OK, body).await;
    }

    pub async fn respond_with_status(&self, path: &str, status: StatusCode, body: Value) {
        self.state
            .responses
            .lock()
            .await
            .insert(path.to_owned(), (status, body));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> RecordedRequest {
        self.requests()
            .await
            .last()
            .cloned()
            .expect("no requests recorded")
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    Extension(state): Extension<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        authorization: header_value(&headers, header::AUTHORIZATION),
        user_agent: header_value(&headers, header::USER_AGENT),
        body: serde_json::from_slice(&body).ok(),
    };

    state.requests.lock().await.push(request);

    let (status, body) = state
        .responses
        .lock()
        .await
        .get(uri.path())
        .cloned()
        .unwrap_or((StatusCode::OK, json!({})));

    (status, Json(body))
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
