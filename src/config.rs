//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and cached in memory. In production,
//! Cloud Run secret bindings inject them as environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Google OAuth client ID the frontend signs in with (public)
    pub google_client_id: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// The single identity allowed to moderate, matched by exact email equality
    pub admin_email: String,
    /// Summarization gateway endpoint
    pub summarizer_url: String,

    // --- Secrets (injected via env) ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// API key for the summarization gateway
    pub summarizer_api_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            admin_email: env::var("ADMIN_EMAIL")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("ADMIN_EMAIL"))?,
            summarizer_url: env::var("SUMMARIZER_URL")
                .map_err(|_| ConfigError::Missing("SUMMARIZER_URL"))?,

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            summarizer_api_key: env::var("SUMMARIZER_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUMMARIZER_API_KEY"))?,
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            google_client_id: "test-client-id.apps.googleusercontent.com".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            admin_email: "admin@example.com".to_string(),
            summarizer_url: "http://localhost:9090/summarize".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            summarizer_api_key: "test_api_key".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
