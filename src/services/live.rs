// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live snapshot streams for the question feed and summary slots.
//!
//! The service is the only writer to Firestore, so it can provide the
//! live-update contract itself: every mutation calls back into the hub,
//! and each subscriber re-queries the store and receives a complete
//! snapshot, never a delta.
//!
//! Subscription contract:
//! - yields `loading` immediately, then the full current snapshot
//! - yields a fresh snapshot after every relevant change
//! - a store failure yields a terminal `error`; no automatic retry
//! - dropping the subscription aborts its task; nothing is delivered
//!   afterwards, even a snapshot already in flight

use crate::db::FirestoreDb;
use crate::models::{AiSummary, Question};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

const CHANGE_CHANNEL_CAPACITY: usize = 64;
const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

/// One state of the live question feed. The three states are mutually
/// exclusive at any instant.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedState {
    Loading,
    Ready { questions: Vec<Question> },
    Error { message: String },
}

/// One state of a single question's summary slot. `Absent` is the valid
/// "no summary yet" state, distinct from `Error`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SummaryState {
    Loading,
    Absent,
    Present { summary: AiSummary },
    Error { message: String },
}

/// Change fan-out hub. One per process, shared via `AppState`.
pub struct LiveHub {
    db: FirestoreDb,
    feed_changes: broadcast::Sender<()>,
    /// Per-question summary channels, created on demand so a summary write
    /// wakes only that question's subscribers.
    summary_channels: DashMap<String, broadcast::Sender<()>>,
}

impl LiveHub {
    pub fn new(db: FirestoreDb) -> Self {
        let (feed_changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            db,
            feed_changes,
            summary_channels: DashMap::new(),
        }
    }

    /// Signal that the question collection changed (create, delete, toggle).
    ///
    /// Called only after the store has acknowledged the write, so the
    /// snapshot that follows always includes it.
    pub fn notify_questions_changed(&self) {
        // Err means no live subscribers; nothing to do.
        let _ = self.feed_changes.send(());
    }

    /// Signal that one question's summary slot changed.
    pub fn notify_summary_changed(&self, question_id: &str) {
        let no_receivers = match self.summary_channels.get(question_id) {
            Some(tx) => tx.send(()).is_err(),
            None => return,
        };

        if no_receivers {
            // Safe against a concurrent subscribe: registration happens
            // under the entry guard, and remove_if re-checks under the
            // shard write lock.
            self.summary_channels
                .remove_if(question_id, |_, tx| tx.receiver_count() == 0);
        }
    }

    /// Subscribe to the full question feed, newest first.
    pub fn subscribe_feed(&self) -> FeedSubscription {
        let (tx, rx) = mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
        // Register for changes before the first query; a write acknowledged
        // between the query and registration must not be missed.
        let mut changes = self.feed_changes.subscribe();
        let db = self.db.clone();

        let task = tokio::spawn(async move {
            if tx.send(FeedState::Loading).await.is_err() {
                return;
            }

            loop {
                let state = match db.list_questions().await {
                    Ok(questions) => FeedState::Ready { questions },
                    Err(e) => {
                        let _ = tx
                            .send(FeedState::Error {
                                message: e.to_string(),
                            })
                            .await;
                        return;
                    }
                };

                if tx.send(state).await.is_err() {
                    return;
                }

                // A lagged receiver still re-queries: every event means
                // "re-read the collection", so missed events collapse into
                // the next snapshot.
                match changes.recv().await {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        });

        FeedSubscription {
            rx,
            _task: AbortOnDrop(task),
        }
    }

    /// Subscribe to one question's summary slot.
    pub fn subscribe_summary(&self, question_id: &str) -> SummarySubscription {
        let (tx, rx) = mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
        // Register under the entry guard (see notify_summary_changed).
        let mut changes = self
            .summary_channels
            .entry(question_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANGE_CHANNEL_CAPACITY).0)
            .subscribe();
        let db = self.db.clone();
        let question_id = question_id.to_string();

        let task = tokio::spawn(async move {
            if tx.send(SummaryState::Loading).await.is_err() {
                return;
            }

            loop {
                let state = match db.get_summary(&question_id).await {
                    Ok(Some(summary)) => SummaryState::Present { summary },
                    Ok(None) => SummaryState::Absent,
                    Err(e) => {
                        let _ = tx
                            .send(SummaryState::Error {
                                message: e.to_string(),
                            })
                            .await;
                        return;
                    }
                };

                if tx.send(state).await.is_err() {
                    return;
                }

                match changes.recv().await {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        });

        SummarySubscription {
            rx,
            _task: AbortOnDrop(task),
        }
    }
}

/// Handle to a live feed subscription. Dropping it cancels delivery.
pub struct FeedSubscription {
    rx: mpsc::Receiver<FeedState>,
    _task: AbortOnDrop,
}

impl FeedSubscription {
    /// Next state, or None once the stream has terminated.
    pub async fn next(&mut self) -> Option<FeedState> {
        self.rx.recv().await
    }
}

/// Handle to a live summary subscription. Dropping it cancels delivery.
pub struct SummarySubscription {
    rx: mpsc::Receiver<SummaryState>,
    _task: AbortOnDrop,
}

impl SummarySubscription {
    pub async fn next(&mut self) -> Option<SummaryState> {
        self.rx.recv().await
    }
}

struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
