// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Question routes for authenticated users.

use crate::db::SUMMARY_DOC_ID;
use crate::error::{AppError, Result};
use crate::middleware::admin::is_admin;
use crate::middleware::auth::AuthUser;
use crate::models::{AiSummary, Question};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Question routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/questions", get(list_questions).post(submit_question))
        .route("/api/questions/{id}", delete(delete_question))
        .route("/api/questions/{id}/summary", get(get_summary))
        .route("/api/questions/{id}/summarize", post(summarize_question))
}

// ─── User Profile ────────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<crate::models::UserProfile>> {
    let profile = state
        .db
        .get_user_profile(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(profile))
}

// ─── Feed Snapshot ───────────────────────────────────────────

/// One-shot snapshot of the wall, newest first.
///
/// The live view is `/api/questions/live`; this exists for non-streaming
/// consumers and for initial render before the stream connects.
async fn list_questions(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Question>>> {
    Ok(Json(state.db.list_questions().await?))
}

// ─── Submission ──────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SubmitQuestionRequest {
    #[validate(length(
        min = 10,
        max = 500,
        message = "Question must be between 10 and 500 characters long"
    ))]
    pub content: String,
}

/// Submit a new question.
///
/// Validation happens before any store call; a rejected submission never
/// reaches the network. The feed update travels through the live hub, not
/// through any local echo.
async fn submit_question(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SubmitQuestionRequest>,
) -> Result<(StatusCode, Json<Question>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let question = Question {
        id: None,
        user_id: user.user_id.clone(),
        user_name: user
            .display_name
            .clone()
            .unwrap_or_else(|| "Anonymous User".to_string()),
        user_image: user.avatar_url.clone(),
        content: payload.content,
        timestamp: now_rfc3339(),
        is_read: None,
    };

    let created = state.db.create_question(&question).await?;
    state.live_hub.notify_questions_changed();

    tracing::info!(
        user_id = %user.user_id,
        question_id = created.id.as_deref().unwrap_or("<unknown>"),
        "Question submitted"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

// ─── Deletion (own questions) ────────────────────────────────

#[derive(Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
}

/// Delete one of the caller's own questions.
///
/// The admin may delete anyone's through the moderation routes; this path
/// only ever removes the caller's own.
async fn delete_question(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(question_id): Path<String>,
) -> Result<Json<DeleteQuestionResponse>> {
    let question = state
        .db
        .get_question(&question_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {} not found", question_id)))?;

    if question.user_id != user.user_id && !is_admin(&user, &state) {
        return Err(AppError::Forbidden(
            "You can only delete your own questions".to_string(),
        ));
    }

    state.db.delete_question(&question_id).await?;
    state.live_hub.notify_questions_changed();
    state.live_hub.notify_summary_changed(&question_id);

    tracing::info!(user_id = %user.user_id, question_id = %question_id, "Question deleted");

    Ok(Json(DeleteQuestionResponse { success: true }))
}

// ─── Summaries ───────────────────────────────────────────────

/// One-shot read of a question's summary slot.
///
/// `null` means no summary has been generated yet; that is not an error.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<String>,
) -> Result<Json<Option<AiSummary>>> {
    Ok(Json(state.db.get_summary(&question_id).await?))
}

/// Generate (or regenerate) the AI summary for a question.
///
/// The slot is written only on a successful gateway response; any failure
/// leaves the store untouched and surfaces as a 502. The UI observes the
/// new summary through the live subscription, which fires only after the
/// write is acknowledged.
async fn summarize_question(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(question_id): Path<String>,
) -> Result<Json<AiSummary>> {
    let question = state
        .db
        .get_question(&question_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {} not found", question_id)))?;

    let summary_text = state.summarizer.summarize(&question.content).await?;

    let summary = AiSummary {
        id: Some(SUMMARY_DOC_ID.to_string()),
        question_id: question_id.clone(),
        summary_text,
        generation_timestamp: now_rfc3339(),
    };

    state.db.set_summary(&question_id, &summary).await?;
    state.live_hub.notify_summary_changed(&question_id);

    tracing::info!(
        user_id = %user.user_id,
        question_id = %question_id,
        "AI summary generated"
    );

    Ok(Json(summary))
}
