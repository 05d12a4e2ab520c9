// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt construction for activity analysis.

use crate::models::Activity;

/// JSON shape the model is asked to answer with. The extractor reads
/// exactly these keys.
const RESPONSE_SCHEMA: &str = r#"{
  "analysis": {
    "overall": "Overall analysis here",
    "pace": "Pace analysis here",
    "heartRate": "Heart rate analysis here",
    "caloriesBurned": "Calories analysis here"
  },
  "improvements": [
    {
      "area": "Area name",
      "recommendation": "Detailed recommendation"
    }
  ],
  "suggestions": [
    {
      "workout": "Workout name",
      "description": "Detailed workout description"
    }
  ],
  "safety": [
    "Safety point 1",
    "Safety point 2"
  ]
}"#;

/// Build the analysis prompt for an activity.
///
/// Output depends only on the activity, so identical events produce
/// identical prompts.
pub fn build_prompt(activity: &Activity) -> String {
    format!(
        "Analyze this fitness activity and provide detailed recommendations \
         in the following JSON format:\n\
         {schema}\n\n\
         Analyze this activity:\n\
         Activity Type: {activity_type}\n\
         Duration: {duration} minutes\n\
         Calories Burned: {calories}\n\
         Additional Metrics: {metrics}\n\n\
         Provide detailed analysis focusing on performance, improvements, \
         next workout suggestions and safety points.\n",
        schema = RESPONSE_SCHEMA,
        activity_type = activity.activity_type,
        duration = activity.duration,
        calories = activity.calories_burned,
        metrics = render_metrics(activity),
    )
}

/// Render metrics as `{key=value, ...}` in key order.
fn render_metrics(activity: &Activity) -> String {
    let entries: Vec<String> = activity
        .additional_metrics
        .iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => format!("{}={}", key, s),
            other => format!("{}={}", key, other),
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}
