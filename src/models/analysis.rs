// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Structured analysis parsed out of the AI provider's reply.

/// Intermediate document between extraction and synthesis.
///
/// Narrative fields are `None` when the model left them out; they are
/// skipped during synthesis rather than rendered as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisDocument {
    pub overall: Option<String>,
    pub pace: Option<String>,
    pub heart_rate: Option<String>,
    pub calories: Option<String>,
    pub improvements: Vec<Improvement>,
    pub suggestions: Vec<Suggestion>,
    pub safety: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Improvement {
    pub area: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub workout: String,
    pub description: String,
}
