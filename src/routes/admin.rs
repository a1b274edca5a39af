// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Moderation routes for the single privileged identity.
//!
//! The whole router sits behind `require_admin` (see routes/mod.rs), and
//! every handler re-checks the caller, so the route gate is never the only
//! boundary between a non-admin and a mutation.

use crate::error::{AppError, Result};
use crate::middleware::admin::is_admin;
use crate::middleware::auth::AuthUser;
use crate::models::Question;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/questions", get(list_all_questions))
        .route("/api/admin/questions/{id}/read", post(toggle_read))
        .route("/api/admin/questions/{id}", delete(delete_any_question))
}

fn ensure_admin(user: &AuthUser, state: &AppState) -> Result<()> {
    if !is_admin(user, state) {
        return Err(AppError::Forbidden(
            "Moderation requires the admin identity".to_string(),
        ));
    }
    Ok(())
}

// ─── Listing ─────────────────────────────────────────────────

/// All questions, newest first, including read state.
async fn list_all_questions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Question>>> {
    ensure_admin(&user, &state)?;
    Ok(Json(state.db.list_questions().await?))
}

// ─── Read Flag ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct ToggleReadResponse {
    pub id: String,
    pub is_read: bool,
}

/// Flip a question's read flag.
///
/// Partial update: only the flag is written. Concurrent toggles from two
/// admin sessions race at last-write-wins granularity.
async fn toggle_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(question_id): Path<String>,
) -> Result<Json<ToggleReadResponse>> {
    ensure_admin(&user, &state)?;

    let question = state
        .db
        .get_question(&question_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {} not found", question_id)))?;

    let new_value = !question.is_read.unwrap_or(false);
    state.db.set_read_flag(&question, new_value).await?;
    state.live_hub.notify_questions_changed();

    tracing::info!(question_id = %question_id, is_read = new_value, "Read flag toggled");

    Ok(Json(ToggleReadResponse {
        id: question_id,
        is_read: new_value,
    }))
}

// ─── Deletion ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DeleteParams {
    /// The client's confirm dialog must set this; a bare DELETE is rejected.
    #[serde(default)]
    confirm: bool,
}

#[derive(Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
}

/// Delete any question (irreversible; cascades to its summary slot).
async fn delete_any_question(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(question_id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteQuestionResponse>> {
    ensure_admin(&user, &state)?;

    if !params.confirm {
        return Err(AppError::BadRequest(
            "Deletion requires explicit confirmation (confirm=true)".to_string(),
        ));
    }

    if state.db.get_question(&question_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Question {} not found",
            question_id
        )));
    }

    state.db.delete_question(&question_id).await?;
    state.live_hub.notify_questions_changed();
    state.live_hub.notify_summary_changed(&question_id);

    tracing::info!(question_id = %question_id, "Question deleted by admin");

    Ok(Json(DeleteQuestionResponse { success: true }))
}
