// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set). The emulator provides a clean state for
//! each test run; individual tests isolate themselves with unique content
//! markers since they share the `questions` collection.

use qa_wall::db::SUMMARY_DOC_ID;
use qa_wall::models::{AiSummary, Question, UserProfile};
use qa_wall::services::{FeedState, LiveHub, SummaryState};

mod common;
use common::test_db;

/// Unique marker for test isolation within the shared collection.
fn unique_marker(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

fn test_question(content: &str, timestamp: &str) -> Question {
    Question {
        id: None,
        user_id: "test-uid".to_string(),
        user_name: "Test User".to_string(),
        user_image: None,
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        is_read: None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// QUESTION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_question_assigns_document_id() {
    require_emulator!();

    let db = test_db().await;
    let marker = unique_marker("create");

    let created = db
        .create_question(&test_question(&marker, "2026-01-01T10:00:00Z"))
        .await
        .unwrap();

    let id = created.id.expect("store must assign a document ID");
    assert_eq!(created.content, marker);

    let fetched = db.get_question(&id).await.unwrap().expect("round trip");
    assert_eq!(fetched.id.as_deref(), Some(id.as_str()));
    assert_eq!(fetched.content, marker);
    assert_eq!(fetched.is_read, None, "read flag starts unset");
}

#[tokio::test]
async fn test_list_questions_newest_first() {
    require_emulator!();

    let db = test_db().await;
    let older = unique_marker("older");
    let newer = unique_marker("newer");

    db.create_question(&test_question(&older, "2026-01-01T10:00:00Z"))
        .await
        .unwrap();
    db.create_question(&test_question(&newer, "2026-01-01T10:05:00Z"))
        .await
        .unwrap();

    let questions = db.list_questions().await.unwrap();

    let pos = |marker: &str| {
        questions
            .iter()
            .position(|q| q.content == marker)
            .expect("created question present in listing")
    };
    assert!(
        pos(&newer) < pos(&older),
        "newer question must order before older"
    );

    // The whole listing is sorted descending by timestamp.
    for pair in questions.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_read_flag_toggle_round_trip() {
    require_emulator!();

    let db = test_db().await;
    let created = db
        .create_question(&test_question(
            &unique_marker("toggle"),
            "2026-01-01T10:00:00Z",
        ))
        .await
        .unwrap();
    let id = created.id.clone().unwrap();

    // unread -> read -> unread is idempotent
    db.set_read_flag(&created, true).await.unwrap();
    let read = db.get_question(&id).await.unwrap().unwrap();
    assert_eq!(read.is_read, Some(true));

    db.set_read_flag(&read, false).await.unwrap();
    let unread = db.get_question(&id).await.unwrap().unwrap();
    assert_eq!(unread.is_read, Some(false));

    // The partial update must not have disturbed any other field.
    assert_eq!(unread.content, created.content);
    assert_eq!(unread.user_id, created.user_id);
    assert_eq!(unread.timestamp, created.timestamp);
}

// ═══════════════════════════════════════════════════════════════════════════
// SUMMARY TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_summary_slot_upsert_and_overwrite() {
    require_emulator!();

    let db = test_db().await;
    let created = db
        .create_question(&test_question(
            &unique_marker("summary"),
            "2026-01-01T10:00:00Z",
        ))
        .await
        .unwrap();
    let id = created.id.unwrap();

    assert!(
        db.get_summary(&id).await.unwrap().is_none(),
        "no summary before first generation"
    );

    let first = AiSummary {
        id: Some(SUMMARY_DOC_ID.to_string()),
        question_id: id.clone(),
        summary_text: "First summary.".to_string(),
        generation_timestamp: "2026-01-01T10:01:00Z".to_string(),
    };
    db.set_summary(&id, &first).await.unwrap();

    let fetched = db.get_summary(&id).await.unwrap().unwrap();
    assert_eq!(fetched.summary_text, "First summary.");

    // Regeneration overwrites the single slot; no second summary coexists.
    let second = AiSummary {
        summary_text: "Second summary.".to_string(),
        generation_timestamp: "2026-01-01T10:02:00Z".to_string(),
        ..first
    };
    db.set_summary(&id, &second).await.unwrap();

    let fetched = db.get_summary(&id).await.unwrap().unwrap();
    assert_eq!(fetched.summary_text, "Second summary.");
    assert_eq!(fetched.generation_timestamp, "2026-01-01T10:02:00Z");
}

#[tokio::test]
async fn test_delete_question_cascades_summary() {
    require_emulator!();

    let db = test_db().await;
    let created = db
        .create_question(&test_question(
            &unique_marker("cascade"),
            "2026-01-01T10:00:00Z",
        ))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let summary = AiSummary {
        id: Some(SUMMARY_DOC_ID.to_string()),
        question_id: id.clone(),
        summary_text: "Doomed summary.".to_string(),
        generation_timestamp: "2026-01-01T10:01:00Z".to_string(),
    };
    db.set_summary(&id, &summary).await.unwrap();

    db.delete_question(&id).await.unwrap();

    assert!(db.get_question(&id).await.unwrap().is_none());
    assert!(
        db.get_summary(&id).await.unwrap().is_none(),
        "summary slot must not be orphaned"
    );
}

#[tokio::test]
async fn test_delete_question_without_summary() {
    require_emulator!();

    let db = test_db().await;
    let created = db
        .create_question(&test_question(
            &unique_marker("plain-delete"),
            "2026-01-01T10:00:00Z",
        ))
        .await
        .unwrap();
    let id = created.id.unwrap();

    // The unconditional cascade must tolerate a missing summary slot.
    db.delete_question(&id).await.unwrap();
    assert!(db.get_question(&id).await.unwrap().is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// USER PROFILE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_profile_upsert() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_marker("user");

    assert!(db.get_user_profile(&user_id).await.unwrap().is_none());

    let profile = UserProfile {
        id: user_id.clone(),
        email: Some("attendee@example.com".to_string()),
        name: Some("Ada".to_string()),
        image_url: None,
        created_at: "2026-01-01T09:00:00Z".to_string(),
    };
    db.upsert_user_profile(&profile).await.unwrap();

    // Sign-in with a changed display name overwrites the profile.
    let renamed = UserProfile {
        name: Some("Ada Lovelace".to_string()),
        image_url: Some("https://example.com/ada.png".to_string()),
        ..profile
    };
    db.upsert_user_profile(&renamed).await.unwrap();

    let fetched = db.get_user_profile(&user_id).await.unwrap().unwrap();
    assert_eq!(fetched.name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(
        fetched.image_url.as_deref(),
        Some("https://example.com/ada.png")
    );
    assert_eq!(fetched.created_at, "2026-01-01T09:00:00Z");
}

// ═══════════════════════════════════════════════════════════════════════════
// LIVE SUBSCRIPTION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_feed_subscription_sees_new_question() {
    require_emulator!();

    let db = test_db().await;
    let hub = LiveHub::new(db.clone());
    let marker = unique_marker("live-feed");

    let mut sub = hub.subscribe_feed();
    assert!(matches!(sub.next().await, Some(FeedState::Loading)));

    let initial = match sub.next().await {
        Some(FeedState::Ready { questions }) => questions,
        other => panic!("expected initial snapshot, got {:?}", other),
    };
    assert!(!initial.iter().any(|q| q.content == marker));

    db.create_question(&test_question(&marker, "2026-01-01T10:00:00Z"))
        .await
        .unwrap();
    hub.notify_questions_changed();

    let updated = match sub.next().await {
        Some(FeedState::Ready { questions }) => questions,
        other => panic!("expected updated snapshot, got {:?}", other),
    };
    assert!(
        updated.iter().any(|q| q.content == marker),
        "acknowledged write must appear in the next snapshot"
    );
}

#[tokio::test]
async fn test_summary_subscription_transitions() {
    require_emulator!();

    let db = test_db().await;
    let hub = LiveHub::new(db.clone());

    let created = db
        .create_question(&test_question(
            &unique_marker("live-summary"),
            "2026-01-01T10:00:00Z",
        ))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let mut sub = hub.subscribe_summary(&id);
    assert!(matches!(sub.next().await, Some(SummaryState::Loading)));
    assert!(matches!(sub.next().await, Some(SummaryState::Absent)));

    let summary = AiSummary {
        id: Some(SUMMARY_DOC_ID.to_string()),
        question_id: id.clone(),
        summary_text: "Lunch timing inquiry.".to_string(),
        generation_timestamp: "2026-01-01T10:01:00Z".to_string(),
    };
    db.set_summary(&id, &summary).await.unwrap();
    hub.notify_summary_changed(&id);

    match sub.next().await {
        Some(SummaryState::Present { summary }) => {
            assert_eq!(summary.summary_text, "Lunch timing inquiry.");
        }
        other => panic!("expected present summary, got {:?}", other),
    }

    // Deleting the question empties the slot again.
    db.delete_question(&id).await.unwrap();
    hub.notify_summary_changed(&id);

    assert!(matches!(sub.next().await, Some(SummaryState::Absent)));
}

#[tokio::test]
async fn test_dropped_subscription_stops_delivery() {
    require_emulator!();

    let db = test_db().await;
    let hub = LiveHub::new(db.clone());

    let mut sub = hub.subscribe_feed();
    assert!(matches!(sub.next().await, Some(FeedState::Loading)));
    drop(sub);

    // Notifying after the drop must not panic, and a fresh subscription
    // still starts from loading.
    hub.notify_questions_changed();

    let mut fresh = hub.subscribe_feed();
    assert!(matches!(fresh.next().await, Some(FeedState::Loading)));
    assert!(matches!(fresh.next().await, Some(FeedState::Ready { .. })));
}
