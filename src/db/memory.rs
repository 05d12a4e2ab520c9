// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory recommendation store for local development and tests.

use crate::db::RecommendationStore;
use crate::error::AppError;
use crate::models::Recommendation;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Recommendations keyed by activity ID.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    records: Arc<DashMap<String, Recommendation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecommendationStore for InMemoryStore {
    async fn save(&self, mut recommendation: Recommendation) -> Result<String, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        recommendation.id = Some(id.clone());
        self.records
            .insert(recommendation.activity_id.clone(), recommendation);
        Ok(id)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Recommendation>, AppError> {
        let mut found: Vec<Recommendation> = self
            .records
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_activity_id(
        &self,
        activity_id: &str,
    ) -> Result<Option<Recommendation>, AppError> {
        Ok(self.records.get(activity_id).map(|entry| entry.value().clone()))
    }
}
