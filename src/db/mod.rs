// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation persistence (Firestore, or in-memory for local runs).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::InMemoryStore;

use crate::error::AppError;
use crate::models::Recommendation;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// Recommendations (keyed by URL-encoded activity ID)
    pub const RECOMMENDATIONS: &str = "recommendations";
}

/// Durable keyed storage for recommendations.
///
/// There is one record per activity: saving again for the same activity
/// replaces the earlier record. Implementations must tolerate concurrent
/// saves for distinct activities.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persist a recommendation, assigning and returning its ID.
    async fn save(&self, recommendation: Recommendation) -> Result<String, AppError>;

    /// All recommendations for a user, newest first.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Recommendation>, AppError>;

    async fn find_by_activity_id(
        &self,
        activity_id: &str,
    ) -> Result<Option<Recommendation>, AppError>;
}

/// Firestore document ID for an activity. Activity IDs are opaque and may
/// contain `/`, which Firestore treats as a path separator.
pub(crate) fn document_id(activity_id: &str) -> String {
    urlencoding::encode(activity_id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_escapes_path_separators() {
        assert_eq!(document_id("abc123"), "abc123");
        assert_eq!(document_id("runs/2024/1"), "runs%2F2024%2F1");
    }
}
