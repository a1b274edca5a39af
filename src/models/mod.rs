// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod question;
pub mod user;

pub use question::{AiSummary, Question};
pub use user::UserProfile;
