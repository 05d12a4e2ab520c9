// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity Insights: AI coaching recommendations for fitness activities
//!
//! This crate consumes activity events from a queue, asks Gemini for an
//! analysis, and stores a normalized recommendation per activity.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::RecommendationStore;
use services::{ActivityConsumer, ActivityQueue};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecommendationStore>,
    pub consumer: Arc<ActivityConsumer>,
    pub queue: ActivityQueue,
}
