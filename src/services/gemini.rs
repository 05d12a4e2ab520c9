// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client for activity analysis.
//!
//! Handles:
//! - A single generateContent round trip per prompt (no retries)
//! - Bounded request timeout
//! - Mapping connection, status and timeout failures to `TransportError`

use crate::config::Config;
use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Longest error body kept in a `TransportError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Failure to obtain a reply from the AI provider.
///
/// The pipeline treats every variant the same way.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("AI request failed: {0}")]
    Request(String),

    #[error("AI endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI request timed out after {0:?}")]
    Timeout(Duration),
}

/// Sends a prompt to a generative text endpoint and returns the raw reply.
#[async_trait]
pub trait AiGateway: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<String, TransportError>;
}

/// Request envelope: `{"contents":[{"parts":[{"text": ...}]}]}`.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        }
    }
}

/// Gemini generateContent client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client from the endpoint, key and timeout in `config`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.gemini_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.gemini_api_url.clone(),
            api_key: config.gemini_api_key.clone(),
            timeout: config.gemini_timeout,
        })
    }
}

#[async_trait]
impl AiGateway for GeminiClient {
    async fn ask(&self, prompt: &str) -> Result<String, TransportError> {
        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Gemini returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        response.text().await.map_err(|e| self.map_reqwest_error(e))
    }
}

impl GeminiClient {
    fn map_reqwest_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            // Strip the URL: it carries the API key as a query parameter.
            TransportError::Request(err.without_url().to_string())
        }
    }
}
