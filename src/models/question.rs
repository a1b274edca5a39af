// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Question and AI summary models for storage and API.

use serde::{Deserialize, Serialize};

/// Submitted question stored in Firestore.
///
/// Author fields are copied from the session at submission time so the feed
/// can render without a join against the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    /// Firestore document ID (store-assigned, populated on reads)
    #[serde(alias = "_firestore_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Author identity key
    pub user_id: String,
    /// Author display name at submission time
    pub user_name: String,
    /// Author avatar URL (may be None)
    pub user_image: Option<String>,
    /// Question text (10-500 chars, enforced at submission only)
    pub content: String,
    /// Creation time (RFC3339), assigned by the service at write time
    pub timestamp: String,
    /// Read flag for admin tracking; unset until first toggled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

/// AI-generated summary of one question.
///
/// Lives in the `aiSummary` sub-collection under its question, always at the
/// fixed document ID `latest`, so each generation overwrites the previous.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiSummary {
    /// Firestore document ID (always "latest")
    #[serde(alias = "_firestore_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning question's document ID
    pub question_id: String,
    /// Generated summary text
    pub summary_text: String,
    /// Generation time (RFC3339), assigned at write time
    pub generation_timestamp: String,
}
