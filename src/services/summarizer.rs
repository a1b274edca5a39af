// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Summarization gateway client.
//!
//! Single operation: send question text to the hosted language model
//! endpoint, get a one-paragraph summary back. Any non-2xx response,
//! network failure, or empty summary text surfaces as a gateway error;
//! the caller decides what (if anything) to persist.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Summarization gateway client.
#[derive(Clone)]
pub struct SummarizerService {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    /// Canned reply for offline tests; skips the network entirely.
    mock_summary: Option<String>,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

impl SummarizerService {
    /// Create a new gateway client.
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            mock_summary: None,
        }
    }

    /// Create a mock gateway for testing (offline mode).
    ///
    /// `summarize` returns `reply` without touching the network. An empty
    /// reply exercises the no-usable-text failure path.
    pub fn new_mock(reply: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: "http://mock.invalid/summarize".to_string(),
            api_key: String::new(),
            mock_summary: Some(reply.to_string()),
        }
    }

    /// Summarize question content.
    ///
    /// Returns the generated text, or a gateway error if the request fails
    /// or the model produced nothing usable. Never retries.
    pub async fn summarize(&self, content: &str) -> Result<String, AppError> {
        let summary = match &self.mock_summary {
            Some(canned) => canned.clone(),
            None => self.request_summary(content).await?,
        };

        if summary.trim().is_empty() {
            return Err(AppError::SummaryGateway(
                "Gateway returned no usable summary text".to_string(),
            ));
        }

        Ok(summary)
    }

    async fn request_summary(&self, content: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SummarizeRequest { content })
            .send()
            .await
            .map_err(|e| AppError::SummaryGateway(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SummaryGateway(format!(
                "Gateway returned HTTP {}: {}",
                status, body
            )));
        }

        let parsed: SummarizeResponse = response
            .json()
            .await
            .map_err(|e| AppError::SummaryGateway(format!("Malformed gateway response: {}", e)))?;

        Ok(parsed.summary)
    }
}
