// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Questions (the Q&A wall collection)
//! - AI summaries (single-slot sub-documents under each question)
//! - User profiles (upserted at sign-in)

use crate::db::{collections, SUMMARY_DOC_ID};
use crate::error::AppError;
use crate::models::{AiSummary, Question, UserProfile};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Question Operations ─────────────────────────────────────

    /// List all questions, newest first.
    ///
    /// The feed has no page limit; the wall shows everything.
    pub async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::QUESTIONS)
            .order_by([(
                "timestamp",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a question by its document ID.
    pub async fn get_question(&self, question_id: &str) -> Result<Option<Question>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::QUESTIONS)
            .obj()
            .one(question_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a question with a store-assigned document ID.
    ///
    /// Returns the created question with its `id` populated.
    pub async fn create_question(&self, question: &Question) -> Result<Question, AppError> {
        let created: Question = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::QUESTIONS)
            .generate_document_id()
            .object(question)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(created)
    }

    /// Write only the read flag of a question (partial field update).
    ///
    /// The rest of the document is left untouched, so a concurrent
    /// summarize or profile change cannot be clobbered by a toggle.
    pub async fn set_read_flag(&self, question: &Question, is_read: bool) -> Result<(), AppError> {
        let question_id = question
            .id
            .as_deref()
            .ok_or_else(|| AppError::Database("Question has no document ID".to_string()))?;

        let updated = Question {
            is_read: Some(is_read),
            ..question.clone()
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(firestore::paths!(Question::{is_read}))
            .in_col(collections::QUESTIONS)
            .document_id(question_id)
            .object(&updated)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a question and its summary slot.
    ///
    /// The summary sub-document is removed first; deleting a missing
    /// summary is a no-op, so the cascade is unconditional. The two deletes
    /// are not transactional. A failure in between leaves a question with no
    /// summary, which is a valid state.
    pub async fn delete_question(&self, question_id: &str) -> Result<(), AppError> {
        let parent_path = self
            .get_client()?
            .parent_path(collections::QUESTIONS, question_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::AI_SUMMARY)
            .parent(&parent_path)
            .document_id(SUMMARY_DOC_ID)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::QUESTIONS)
            .document_id(question_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    // ─── Summary Operations ──────────────────────────────────────

    /// Get the summary slot for a question, if one has been generated.
    pub async fn get_summary(&self, question_id: &str) -> Result<Option<AiSummary>, AppError> {
        let parent_path = self
            .get_client()?
            .parent_path(collections::QUESTIONS, question_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::AI_SUMMARY)
            .parent(&parent_path)
            .obj()
            .one(SUMMARY_DOC_ID)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite the summary slot for a question.
    pub async fn set_summary(
        &self,
        question_id: &str,
        summary: &AiSummary,
    ) -> Result<(), AppError> {
        let parent_path = self
            .get_client()?
            .parent_path(collections::QUESTIONS, question_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::AI_SUMMARY)
            .document_id(SUMMARY_DOC_ID)
            .parent(&parent_path)
            .object(summary)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Profile Operations ─────────────────────────────────

    /// Get a user profile by identity subject.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user profile.
    pub async fn upsert_user_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
