// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin gate middleware.
//!
//! Exactly one identity, matched by exact email equality against the
//! configured admin address, may reach the moderation routes. This layer
//! runs inside `require_auth`, so the `AuthUser` extension is present.

use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// True when the authenticated user is the configured admin.
pub fn is_admin(user: &AuthUser, state: &AppState) -> bool {
    user.email.as_deref() == Some(state.config.admin_email.as_str())
}

/// Middleware that requires the single privileged identity.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !is_admin(user, &state) {
        tracing::warn!(user_id = %user.user_id, "Non-admin access to moderation route denied");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
