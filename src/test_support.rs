//! Shared test fixtures: a recording navigator and an in-process mock backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::navigation::{Navigator, Route};
use crate::net::ApiClient;
use crate::session::{MemoryStore, SessionService, SessionStore};

// =============================================================================
// NAVIGATION
// =============================================================================

#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub(crate) struct Harness {
    pub store: MemoryStore,
    pub navigator: Arc<RecordingNavigator>,
    pub session: SessionService,
}

pub(crate) fn harness() -> Harness {
    let store = MemoryStore::new();
    let navigator = Arc::new(RecordingNavigator::default());
    let session = SessionService::new(Arc::new(store.clone()), navigator.clone());
    Harness { store, navigator, session }
}

pub(crate) fn logged_in_harness(token: &str) -> Harness {
    let h = harness();
    h.store.write(token, &serde_json::json!({ "id": 1, "email": "ana@example.com" }));
    h
}

// =============================================================================
// MOCK BACKEND
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeenRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    responses: HashMap<(String, String), (u16, String)>,
    seen: Mutex<Vec<SeenRequest>>,
}

/// Canned-response HTTP server bound to an ephemeral localhost port.
pub(crate) struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Start a server answering `(method, path)` with `(status, body)`.
    /// Unlisted routes answer 404.
    pub(crate) async fn start(routes: &[(&str, &str, u16, Value)]) -> Self {
        let responses = routes
            .iter()
            .map(|(method, path, status, body)| {
                let body = if body.is_null() { String::new() } else { body.to_string() };
                (((*method).to_owned(), (*path).to_owned()), (*status, body))
            })
            .collect();
        let state = Arc::new(MockState { responses, seen: Mutex::new(Vec::new()) });

        let app = Router::new().fallback(record_and_respond).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url: format!("http://{addr}"), state }
    }

    pub(crate) fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub(crate) fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, std::env::temp_dir()).unwrap()
    }

    pub(crate) fn api(&self, session: &SessionService) -> ApiClient {
        ApiClient::new(&self.config(), session.clone()).unwrap()
    }
}

async fn record_and_respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_owned();
    state.seen.lock().unwrap().push(SeenRequest {
        method: method.as_str().to_owned(),
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
        body: serde_json::from_str(&body).ok(),
    });

    match state.responses.get(&(method.as_str().to_owned(), path)) {
        Some((status, body)) => {
            let status = StatusCode::from_u16(*status).unwrap();
            (status, [(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
