// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity Insights API Server
//!
//! Receives activity events, generates AI recommendations for them and
//! serves the stored results.

use activity_insights::{
    config::{Config, QueueBackend, StoreBackend},
    db::{FirestoreDb, InMemoryStore, RecommendationStore},
    services::{spawn_local_workers, ActivityConsumer, ActivityQueue, GeminiClient, TasksService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Activity Insights API");

    let store: Arc<dyn RecommendationStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory recommendation store (data is not persisted)");
            Arc::new(InMemoryStore::new())
        }
    };

    let gateway = Arc::new(GeminiClient::new(&config)?);
    tracing::info!(
        timeout_secs = config.gemini_timeout.as_secs(),
        "Gemini client initialized"
    );

    let consumer = Arc::new(ActivityConsumer::new(gateway, store.clone()));

    let queue = match config.queue_backend {
        QueueBackend::CloudTasks => {
            let tasks = TasksService::new(&config.gcp_project_id, &config.gcp_region);
            tracing::info!(queue = %tasks.queue_path(), "Cloud Tasks service initialized");
            ActivityQueue::CloudTasks {
                tasks,
                service_url: config.api_url.clone(),
            }
        }
        QueueBackend::Local => {
            // Workers stop once the queue (held by the app state) is dropped.
            let (queue, _workers) = spawn_local_workers(consumer.clone(), config.worker_count);
            queue
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        consumer,
        queue,
    });

    // Build router
    let app = activity_insights::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("activity_insights=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .try_init()?;
    Ok(())
}
