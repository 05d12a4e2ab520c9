// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Task handler routes for Cloud Tasks callbacks.
//!
//! These endpoints are called by the activity queue, not directly by users.

use crate::middleware::require_queue_header;
use crate::models::Activity;
use crate::services::tasks::PROCESS_ACTIVITY_PATH;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    middleware,
    routing::post,
    Router,
};
use std::sync::Arc;

/// Task handler routes (called by Cloud Tasks).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(PROCESS_ACTIVITY_PATH, post(process_activity))
        .route_layer(middleware::from_fn(require_queue_header))
}

/// Analyze a single activity (called by Cloud Tasks).
///
/// AI and parsing failures still store a default recommendation and return
/// 200. Only a failed store write returns 500, which makes Cloud Tasks
/// redeliver the event.
async fn process_activity(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<Activity>,
) -> StatusCode {
    match state.consumer.process(&activity).await {
        Ok(result) => {
            tracing::info!(
                activity_id = %activity.id,
                recommendation_id = %result.recommendation_id,
                degraded = result.fallback.is_some(),
                "Activity processed successfully"
            );
            StatusCode::OK
        }
        Err(e) => {
            tracing::error!(
                activity_id = %activity.id,
                error = %e,
                "Failed to process activity"
            );
            // Return 500 to trigger Cloud Tasks retry
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
