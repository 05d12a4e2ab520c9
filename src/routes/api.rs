// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: publishing activities and reading recommendations.

use crate::error::{AppError, Result};
use crate::models::{Activity, Recommendation};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", post(publish_activity))
        .route(
            "/api/recommendations/user/{user_id}",
            get(get_user_recommendations),
        )
        .route(
            "/api/recommendations/activity/{activity_id}",
            get(get_activity_recommendation),
        )
}

// ─── Publishing ──────────────────────────────────────────────

/// Response for a queued activity.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublishResponse {
    pub activity_id: String,
    pub status: String,
}

/// Queue an activity for analysis. The recommendation appears once a
/// worker has processed it.
async fn publish_activity(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<Activity>,
) -> Result<(StatusCode, Json<PublishResponse>)> {
    activity.validate()?;

    let activity_id = activity.id.clone();
    state.queue.publish(activity).await?;

    tracing::info!(activity_id = %activity_id, "Activity queued for analysis");

    Ok((
        StatusCode::ACCEPTED,
        Json(PublishResponse {
            activity_id,
            status: "queued".to_string(),
        }),
    ))
}

// ─── Recommendations ─────────────────────────────────────────

/// All recommendations for a user, newest first.
async fn get_user_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Recommendation>>> {
    Ok(Json(state.store.find_by_user_id(&user_id).await?))
}

async fn get_activity_recommendation(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<String>,
) -> Result<Json<Recommendation>> {
    state
        .store
        .find_by_activity_id(&activity_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("No recommendation for activity {}", activity_id))
        })
}
