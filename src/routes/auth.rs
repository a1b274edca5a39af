// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google sign-in routes.
//!
//! The frontend completes the Google Identity Services flow itself and
//! posts the resulting ID token here. We verify it, upsert the user's
//! profile, and hand back a session JWT (also set as an HttpOnly cookie).

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_session_jwt, SESSION_COOKIE};
use crate::models::UserProfile;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", post(sign_in))
        .route("/auth/logout", get(logout))
}

#[derive(Deserialize)]
pub struct SignInRequest {
    id_token: String,
}

#[derive(Serialize)]
pub struct SignInResponse {
    /// Session JWT, for clients that prefer a bearer header over the cookie
    pub token: String,
    pub user: UserProfile,
}

/// Verify a Google ID token and establish a session.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SignInRequest>,
) -> Result<(CookieJar, Json<SignInResponse>)> {
    let identity = state
        .google_verifier
        .verify_id_token(&payload.id_token)
        .await?;

    // Upsert the profile on every successful sign-in, preserving the
    // original creation time.
    let created_at = state
        .db
        .get_user_profile(&identity.subject)
        .await?
        .map(|p| p.created_at)
        .unwrap_or_else(now_rfc3339);

    let profile = UserProfile {
        id: identity.subject.clone(),
        email: identity.email.clone(),
        name: identity.name.clone(),
        image_url: identity.picture.clone(),
        created_at,
    };
    state.db.upsert_user_profile(&profile).await?;

    let token = create_session_jwt(&identity, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %profile.id, "User signed in");

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(SignInResponse { token, user: profile })))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Clear the session cookie.
///
/// The JWT itself stays valid until expiry; clients holding a bearer copy
/// simply discard it.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    (
        jar.remove(Cookie::from(SESSION_COOKIE)),
        Json(LogoutResponse { success: true }),
    )
}
