// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jsonwebtoken::DecodingKey;
use qa_wall::config::Config;
use qa_wall::db::FirestoreDb;
use qa_wall::routes::create_router;
use qa_wall::services::{GoogleIdentityVerifier, LiveHub, SummarizerService};
use qa_wall::AppState;
use serde::Serialize;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// A static-key sign-in verifier; router tests never verify Google tokens,
/// so any RSA key material works as a placeholder.
fn test_verifier(config: &Config) -> GoogleIdentityVerifier {
    // Minimal valid RSA components (base64url), only so the verifier can be
    // constructed; no test token is ever validated against them.
    let key = DecodingKey::from_rsa_components("AQAB", "AQAB").expect("static test key");
    GoogleIdentityVerifier::new_with_static_key(&config.google_client_id, "test-kid", key)
        .expect("static verifier")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(test_db_offline())
}

/// Create a test app over a specific database (offline mock or emulator).
#[allow(dead_code)]
pub fn create_test_app_with_db(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let live_hub = LiveHub::new(db.clone());
    let summarizer = SummarizerService::new_mock("Lunch timing inquiry.");
    let google_verifier = Arc::new(test_verifier(&config));

    let state = Arc::new(AppState {
        config,
        db,
        live_hub,
        summarizer,
        google_verifier,
    });

    (create_router(state.clone()), state)
}

/// Create a test session JWT mirroring the claims the middleware expects.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, email: Option<&str>, signing_key: &[u8]) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: Option<String>,
        name: Option<String>,
        picture: Option<String>,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(|e| e.to_string()),
        name: Some("Test User".to_string()),
        picture: None,
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}
