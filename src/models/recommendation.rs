// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recommendation record for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored recommendation record in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Recommendation {
    /// Assigned by the store on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Activity that produced this recommendation
    pub activity_id: String,
    pub user_id: String,
    pub activity_type: String,
    /// Assembled narrative ("Overall:...:\n\nPace:...")
    pub recommendation: String,
    /// "<area>: <detail>" entries, never empty
    pub improvements: Vec<String>,
    /// "<workout>: <description>" entries, never empty
    pub suggestions: Vec<String>,
    /// Never empty
    pub safety: Vec<String>,
    /// Stored as fixed-width RFC3339 so Firestore can order by it
    #[serde(with = "crate::time_utils::rfc3339_nanos")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}
