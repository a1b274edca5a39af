// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Q&A Wall: real-time conference question board backend
//!
//! This crate provides the backend API for the conference Q&A wall:
//! authenticated attendees submit questions and follow a live feed, an AI
//! gateway produces per-question summaries, and a single admin identity
//! moderates the board.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{GoogleIdentityVerifier, LiveHub, SummarizerService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub live_hub: LiveHub,
    pub summarizer: SummarizerService,
    pub google_verifier: Arc<GoogleIdentityVerifier>,
}
