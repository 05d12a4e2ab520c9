// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Inbound activity event, as published by the activity service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// One exercise session delivered on the activity queue.
///
/// The pipeline never mutates or persists this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity ID assigned by the activity service
    #[validate(length(min = 1, max = 128))]
    pub id: String,
    /// Owning user ID
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    /// Resolved activity type label (Running, Cycling, ...)
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64))]
    pub activity_type: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub calories_burned: u32,
    /// Free-form metrics (distance, heart rate, ...). Ordered so that
    /// prompts render identically for identical input.
    #[serde(default)]
    pub additional_metrics: BTreeMap<String, serde_json::Value>,
}
