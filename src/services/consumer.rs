// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity processing service.
//!
//! Handles the core workflow for one activity event:
//! 1. Build the analysis prompt
//! 2. Ask the AI provider
//! 3. Extract the analysis document from the reply
//! 4. Synthesize the recommendation (default recommendation on any AI failure)
//! 5. Store it
//!
//! Steps 1-4 work on local values only; the store write is the single
//! commit point.

use crate::db::RecommendationStore;
use crate::error::Result;
use crate::models::{Activity, Recommendation};
use crate::services::extractor;
use crate::services::gemini::AiGateway;
use crate::services::prompt::build_prompt;
use crate::services::synthesizer::synthesize;
use std::sync::Arc;

/// Why a recommendation was built from the default content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The AI call failed, returned an error status, or timed out.
    Transport,
    /// The reply could not be parsed.
    Extraction,
}

/// Result of processing an activity.
#[derive(Debug)]
pub struct ProcessResult {
    pub recommendation_id: String,
    pub fallback: Option<FallbackReason>,
}

/// Drives one activity event from prompt to stored recommendation.
///
/// Holds no per-event state; one instance is shared by all workers.
pub struct ActivityConsumer {
    gateway: Arc<dyn AiGateway>,
    store: Arc<dyn RecommendationStore>,
}

impl ActivityConsumer {
    pub fn new(gateway: Arc<dyn AiGateway>, store: Arc<dyn RecommendationStore>) -> Self {
        Self { gateway, store }
    }

    /// Process one activity event.
    ///
    /// Only a store failure is returned as an error; the delivery system
    /// decides whether to redeliver.
    pub async fn process(&self, activity: &Activity) -> Result<ProcessResult> {
        tracing::info!(
            activity_id = %activity.id,
            user_id = %activity.user_id,
            "Received activity for processing"
        );

        let (recommendation, fallback) = self.generate(activity).await;

        let recommendation_id = self.store.save(recommendation).await.map_err(|e| {
            tracing::error!(
                activity_id = %activity.id,
                error = %e,
                "Failed to store recommendation"
            );
            e
        })?;

        tracing::info!(
            activity_id = %activity.id,
            recommendation_id = %recommendation_id,
            fallback = ?fallback,
            "Recommendation stored"
        );

        Ok(ProcessResult {
            recommendation_id,
            fallback,
        })
    }

    /// Produce a recommendation without storing it. Never fails.
    pub async fn generate(&self, activity: &Activity) -> (Recommendation, Option<FallbackReason>) {
        let prompt = build_prompt(activity);

        let raw = match self.gateway.ask(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    activity_id = %activity.id,
                    stage = "ai-called",
                    error = %e,
                    "AI request failed, using default recommendation"
                );
                return (synthesize(activity, None), Some(FallbackReason::Transport));
            }
        };
        tracing::debug!(activity_id = %activity.id, response = %raw, "Response from AI");

        match extractor::extract(&raw) {
            Ok(analysis) => (synthesize(activity, Some(&analysis)), None),
            Err(e) => {
                tracing::warn!(
                    activity_id = %activity.id,
                    stage = "extracted",
                    error = %e,
                    "Could not parse AI response, using default recommendation"
                );
                (synthesize(activity, None), Some(FallbackReason::Extraction))
            }
        }
    }
}
