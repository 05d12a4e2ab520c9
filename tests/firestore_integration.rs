// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it; otherwise they are skipped.

use activity_insights::db::RecommendationStore;
use activity_insights::models::{Activity, AnalysisDocument, Improvement};
use activity_insights::services::synthesizer::synthesize;

mod common;
use common::{test_activity, test_db};

/// Generate a unique ID for test isolation.
fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

fn activity_for(user_id: &str) -> Activity {
    Activity {
        user_id: user_id.to_string(),
        ..test_activity(&unique_id("act"))
    }
}

#[tokio::test]
async fn test_save_and_find_by_activity() {
    require_emulator!();

    let db = test_db().await;
    let activity = activity_for(&unique_id("user"));
    let doc = AnalysisDocument {
        overall: Some("Nice and steady".to_string()),
        improvements: vec![Improvement {
            area: "Breathing".to_string(),
            recommendation: "Nasal breathing on easy runs".to_string(),
        }],
        ..Default::default()
    };

    let id = db.save(synthesize(&activity, Some(&doc))).await.unwrap();

    let fetched = db
        .find_by_activity_id(&activity.id)
        .await
        .unwrap()
        .expect("Recommendation should exist after save");
    assert_eq!(fetched.id.as_deref(), Some(id.as_str()));
    assert_eq!(fetched.recommendation, "Overall:Nice and steady:");
    assert_eq!(
        fetched.improvements,
        vec!["Breathing: Nasal breathing on easy runs"]
    );

    println!("✓ Recommendation stored and fetched: activity_id={}", activity.id);
}

#[tokio::test]
async fn test_activity_id_with_slash() {
    require_emulator!();

    let db = test_db().await;
    let mut activity = activity_for(&unique_id("user"));
    activity.id = format!("imports/{}", unique_id("act"));

    db.save(synthesize(&activity, None)).await.unwrap();

    let fetched = db.find_by_activity_id(&activity.id).await.unwrap();
    assert_eq!(fetched.unwrap().activity_id, activity.id);
}

#[tokio::test]
async fn test_redelivery_overwrites() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_id("user");
    let activity = activity_for(&user_id);

    db.save(synthesize(&activity, None)).await.unwrap();
    let second = db
        .save(synthesize(&activity, Some(&AnalysisDocument::default())))
        .await
        .unwrap();

    let all = db.find_by_user_id(&user_id).await.unwrap();
    assert_eq!(all.len(), 1, "Same activity should keep a single record");
    assert_eq!(all[0].id.as_deref(), Some(second.as_str()));
}

#[tokio::test]
async fn test_find_by_user_id_filters_and_orders() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_id("user");

    let older = activity_for(&user_id);
    let newer = activity_for(&user_id);
    let other = activity_for(&unique_id("user"));

    db.save(synthesize(&older, None)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    db.save(synthesize(&newer, None)).await.unwrap();
    db.save(synthesize(&other, None)).await.unwrap();

    let found = db.find_by_user_id(&user_id).await.unwrap();
    let ids: Vec<&str> = found.iter().map(|r| r.activity_id.as_str()).collect();
    assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);

    db.delete_recommendation(&older.id).await.unwrap();
    db.delete_recommendation(&newer.id).await.unwrap();
    db.delete_recommendation(&other.id).await.unwrap();
    assert!(db.find_by_user_id(&user_id).await.unwrap().is_empty());
}
