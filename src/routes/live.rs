// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-Sent Events endpoints for the live subscriptions.
//!
//! Each connection owns one hub subscription; when the client disconnects,
//! axum drops the stream, which drops the subscription handle and aborts
//! its task. Nothing is delivered after that, even a snapshot in flight.

use crate::AppState;
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::stream::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/questions/live", get(feed_stream))
        .route("/api/questions/{id}/summary/live", get(summary_stream))
}

/// Live question feed: loading, then a complete snapshot per change.
async fn feed_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let subscription = state.live_hub.subscribe_feed();

    let stream = futures_util::stream::unfold(subscription, |mut sub| async move {
        let state = sub.next().await?;
        Some((Ok(snapshot_event(&state)), sub))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Live summary slot for one question.
async fn summary_stream(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<String>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let subscription = state.live_hub.subscribe_summary(&question_id);

    let stream = futures_util::stream::unfold(subscription, |mut sub| async move {
        let state = sub.next().await?;
        Some((Ok(snapshot_event(&state)), sub))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn snapshot_event<T: Serialize>(payload: &T) -> Event {
    Event::default()
        .event("snapshot")
        .json_data(payload)
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize live snapshot");
            Event::default()
                .event("error")
                .data("snapshot serialization failed")
        })
}
