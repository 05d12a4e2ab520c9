// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation synthesis.
//!
//! Turns an analysis document (or the lack of one) into a storable
//! recommendation. Never fails: every collection on the output is
//! non-empty.

use crate::models::{Activity, AnalysisDocument, Recommendation};
use chrono::{DateTime, Utc};

pub const NO_IMPROVEMENTS: &str = "NO specific Improvements provided: ";
pub const NO_SUGGESTIONS: &str = "No specific Suggestion provided: ";
pub const NO_SAFETY: &str = "Follow General Safety Guidelines";

pub const DEFAULT_NARRATIVE: &str = "Unable to generate detailed analysis";
pub const DEFAULT_IMPROVEMENT: &str = "Continue with your routine";
pub const DEFAULT_SUGGESTION: &str = "Consider Consulting a fitness professional ";
pub const DEFAULT_SAFETY: [&str; 3] = [
    "Always warmup before exercise",
    "Stay Hydrated",
    "Listen to your body",
];

/// Build the recommendation for `activity`, stamped with the current time.
///
/// `None` means the AI call or extraction failed and yields the default
/// recommendation.
pub fn synthesize(activity: &Activity, analysis: Option<&AnalysisDocument>) -> Recommendation {
    synthesize_at(activity, analysis, Utc::now())
}

/// Same as [`synthesize`] with an explicit creation time.
pub fn synthesize_at(
    activity: &Activity,
    analysis: Option<&AnalysisDocument>,
    created_at: DateTime<Utc>,
) -> Recommendation {
    let (recommendation, improvements, suggestions, safety) = match analysis {
        Some(doc) => (
            assemble_narrative(doc),
            or_sentinel(
                doc.improvements
                    .iter()
                    .map(|i| format!("{}: {}", i.area, i.recommendation))
                    .collect(),
                NO_IMPROVEMENTS,
            ),
            or_sentinel(
                doc.suggestions
                    .iter()
                    .map(|s| format!("{}: {}", s.workout, s.description))
                    .collect(),
                NO_SUGGESTIONS,
            ),
            or_sentinel(doc.safety.clone(), NO_SAFETY),
        ),
        None => (
            DEFAULT_NARRATIVE.to_string(),
            vec![DEFAULT_IMPROVEMENT.to_string()],
            vec![DEFAULT_SUGGESTION.to_string()],
            DEFAULT_SAFETY.iter().map(|s| s.to_string()).collect(),
        ),
    };

    Recommendation {
        id: None,
        activity_id: activity.id.clone(),
        user_id: activity.user_id.clone(),
        activity_type: activity.activity_type.clone(),
        recommendation,
        improvements,
        suggestions,
        safety,
        created_at,
    }
}

/// Concatenate present narrative fields as `"<Label>:<value>:\n\n"` in
/// fixed order, then drop the trailing whitespace.
fn assemble_narrative(doc: &AnalysisDocument) -> String {
    let sections = [
        ("Overall:", &doc.overall),
        ("Pace:", &doc.pace),
        ("HeartRate:", &doc.heart_rate),
        ("CaloriesBurned:", &doc.calories),
    ];

    let mut narrative = String::new();
    for (label, value) in sections {
        if let Some(value) = value {
            narrative.push_str(label);
            narrative.push_str(value);
            narrative.push_str(":\n\n");
        }
    }
    narrative.trim().to_string()
}

fn or_sentinel(items: Vec<String>, sentinel: &str) -> Vec<String> {
    if items.is_empty() {
        vec![sentinel.to_string()]
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Improvement, Suggestion};
    use std::collections::BTreeMap;

    fn activity() -> Activity {
        Activity {
            id: "act-42".to_string(),
            user_id: "user-7".to_string(),
            activity_type: "Cycling".to_string(),
            duration: 90,
            calories_burned: 800,
            additional_metrics: BTreeMap::new(),
        }
    }

    fn full_document() -> AnalysisDocument {
        AnalysisDocument {
            overall: Some("Strong ride".to_string()),
            pace: Some("Steady".to_string()),
            heart_rate: Some("Zone 2".to_string()),
            calories: Some("As expected".to_string()),
            improvements: vec![Improvement {
                area: "Climbing".to_string(),
                recommendation: "Add hill repeats".to_string(),
            }],
            suggestions: vec![Suggestion {
                workout: "Recovery spin".to_string(),
                description: "45 min easy".to_string(),
            }],
            safety: vec!["Wear a helmet".to_string()],
        }
    }

    #[test]
    fn test_full_document() {
        let rec = synthesize(&activity(), Some(&full_document()));

        assert_eq!(
            rec.recommendation,
            "Overall:Strong ride:\n\nPace:Steady:\n\nHeartRate:Zone 2:\n\nCaloriesBurned:As expected:"
        );
        assert_eq!(rec.improvements, vec!["Climbing: Add hill repeats"]);
        assert_eq!(rec.suggestions, vec!["Recovery spin: 45 min easy"]);
        assert_eq!(rec.safety, vec!["Wear a helmet"]);
        assert_eq!(rec.activity_id, "act-42");
        assert_eq!(rec.user_id, "user-7");
        assert_eq!(rec.activity_type, "Cycling");
        assert!(rec.id.is_none());
    }

    #[test]
    fn test_absent_sections_are_skipped() {
        let doc = AnalysisDocument {
            pace: Some("Fast".to_string()),
            calories: Some("High".to_string()),
            ..Default::default()
        };
        let rec = synthesize(&activity(), Some(&doc));
        assert_eq!(rec.recommendation, "Pace:Fast:\n\nCaloriesBurned:High:");
    }

    #[test]
    fn test_empty_collections_get_one_sentinel_each() {
        let rec = synthesize(&activity(), Some(&AnalysisDocument::default()));

        assert_eq!(rec.recommendation, "");
        assert_eq!(rec.improvements, vec![NO_IMPROVEMENTS]);
        assert_eq!(rec.suggestions, vec![NO_SUGGESTIONS]);
        assert_eq!(rec.safety, vec![NO_SAFETY]);
    }

    #[test]
    fn test_sentinels_apply_independently() {
        let doc = AnalysisDocument {
            safety: vec!["Stretch".to_string()],
            ..Default::default()
        };
        let rec = synthesize(&activity(), Some(&doc));
        assert_eq!(rec.improvements, vec![NO_IMPROVEMENTS]);
        assert_eq!(rec.safety, vec!["Stretch"]);
    }

    #[test]
    fn test_default_recommendation() {
        let rec = synthesize(&activity(), None);

        assert_eq!(rec.recommendation, DEFAULT_NARRATIVE);
        assert_eq!(rec.improvements, vec![DEFAULT_IMPROVEMENT]);
        assert_eq!(rec.suggestions, vec![DEFAULT_SUGGESTION]);
        assert_eq!(rec.safety, DEFAULT_SAFETY.to_vec());
        assert_eq!(rec.activity_id, "act-42");
        assert_eq!(rec.activity_type, "Cycling");
    }

    #[test]
    fn test_repeat_synthesis_differs_only_in_timestamp() {
        let doc = full_document();
        let first = synthesize(&activity(), Some(&doc));
        let second = synthesize(&activity(), Some(&doc));

        let pinned = Recommendation {
            created_at: first.created_at,
            ..second
        };
        assert_eq!(first, pinned);
    }
}
