// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_insights::config::Config;
use activity_insights::db::{FirestoreDb, InMemoryStore, RecommendationStore};
use activity_insights::models::Activity;
use activity_insights::routes::create_router;
use activity_insights::services::{
    spawn_local_workers, ActivityConsumer, AiGateway, TransportError,
};
use activity_insights::AppState;
use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Envelope from the well-formed reply scenario: fenced JSON with only an
/// overall analysis and empty collections.
#[allow(dead_code)]
pub const GOOD_PACE_ENVELOPE: &str = r#"{"candidates":[{"content":{"parts":[{"text":"```json\n{\"analysis\":{\"overall\":\"Good pace\"},\"improvements\":[],\"suggestions\":[],\"safety\":[]}\n```"}]}}]}"#;

/// A basic running activity.
#[allow(dead_code)]
pub fn test_activity(id: &str) -> Activity {
    let mut metrics = BTreeMap::new();
    metrics.insert("distanceKm".to_string(), serde_json::json!(5.0));
    Activity {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        activity_type: "Running".to_string(),
        duration: 30,
        calories_burned: 320,
        additional_metrics: metrics,
    }
}

/// Gateway with a canned reply; `None` simulates a transport failure.
#[allow(dead_code)]
pub struct StubGateway(pub Option<String>);

#[async_trait]
impl AiGateway for StubGateway {
    async fn ask(&self, _prompt: &str) -> Result<String, TransportError> {
        self.0
            .clone()
            .ok_or_else(|| TransportError::Request("connection refused".to_string()))
    }
}

/// Create a test app backed by an in-memory store and a local worker pool.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app(
    gateway: Arc<dyn AiGateway>,
) -> (Router, Arc<AppState>, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let (router, state) = create_test_app_with_store(gateway, store.clone());
    (router, state, store)
}

/// Create a test app with an arbitrary store (e.g. the offline Firestore mock).
#[allow(dead_code)]
pub fn create_test_app_with_store(
    gateway: Arc<dyn AiGateway>,
    store: Arc<dyn RecommendationStore>,
) -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let consumer = Arc::new(ActivityConsumer::new(gateway, store.clone()));
    let (queue, _workers) = spawn_local_workers(consumer.clone(), config.worker_count);

    let state = Arc::new(AppState {
        config,
        store,
        consumer,
        queue,
    });

    (create_router(state.clone()), state)
}

/// Request received by the fake Gemini endpoint.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub key: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn fake_generate(
    State(fake): State<FakeGemini>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    fake.requests.lock().unwrap().push(CapturedRequest {
        key: params.get("key").cloned(),
        body,
    });
    tokio::time::sleep(fake.delay).await;
    (fake.status, fake.body.clone())
}

/// Start a fake Gemini endpoint on a random local port.
///
/// Returns the endpoint URL and the log of received requests.
#[allow(dead_code)]
pub async fn spawn_fake_gemini(
    status: StatusCode,
    body: &str,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let fake = FakeGemini {
        status,
        body: body.to_string(),
        delay,
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/v1beta/generate", post(fake_generate))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake Gemini listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta/generate", addr), requests)
}

/// Test config pointing the Gemini client at `url`.
#[allow(dead_code)]
pub fn config_for(url: &str, timeout: Duration) -> Config {
    Config {
        gemini_api_url: url.to_string(),
        gemini_timeout: timeout,
        ..Config::test_default()
    }
}
