// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Q&A Wall API Server
//!
//! Real-time conference Q&A wall: attendees sign in with Google, post
//! questions, follow a live feed, and request AI summaries; a single
//! admin identity moderates the board.

use qa_wall::{
    config::Config,
    db::FirestoreDb,
    services::{GoogleIdentityVerifier, LiveHub, SummarizerService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Q&A Wall API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Live snapshot hub; every mutation notifies it
    let live_hub = LiveHub::new(db.clone());

    // Summarization gateway client
    let summarizer = SummarizerService::new(
        config.summarizer_url.clone(),
        config.summarizer_api_key.clone(),
    );
    tracing::info!(endpoint = %config.summarizer_url, "Summarization gateway initialized");

    // Google sign-in verifier
    let google_verifier = Arc::new(
        GoogleIdentityVerifier::new(&config.google_client_id)
            .expect("Failed to initialize Google sign-in verifier"),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        live_hub,
        summarizer,
        google_verifier,
    });

    // Build router
    let app = qa_wall::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qa_wall=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
