// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod google_identity;
pub mod live;
pub mod summarizer;

pub use google_identity::{GoogleIdentityVerifier, VerifiedIdentity};
pub use live::{FeedState, LiveHub, SummaryState};
pub use summarizer::SummarizerService;
