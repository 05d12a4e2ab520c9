// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and handed to each service constructor.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Name of the queue that pushes activity events to `/tasks/process-activity`.
pub const ACTIVITY_QUEUE_NAME: &str = "activity-queue";

const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Where published activities go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueBackend {
    /// Cloud Tasks pushes each activity back to this service over HTTP.
    CloudTasks,
    /// In-process channel drained by a local worker pool.
    Local,
}

impl FromStr for QueueBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloud-tasks" | "cloud_tasks" => Ok(Self::CloudTasks),
            "local" => Ok(Self::Local),
            _ => Err(ConfigError::Invalid("QUEUE_BACKEND", s.to_string())),
        }
    }
}

/// Where recommendations are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- AI provider ---
    /// Gemini generateContent endpoint (without the key)
    pub gemini_api_url: String,
    /// Gemini API key (secret)
    pub gemini_api_key: String,
    /// Upper bound on a single Gemini round trip
    pub gemini_timeout: Duration,

    // --- Infrastructure ---
    /// GCP project ID
    pub gcp_project_id: String,
    /// GCP region hosting the task queue
    pub gcp_region: String,
    /// Public base URL of this service, used as the Cloud Tasks target
    pub api_url: String,
    /// Server port
    pub port: u16,
    pub queue_backend: QueueBackend,
    pub store_backend: StoreBackend,
    /// Concurrent workers for the local queue backend
    pub worker_count: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let port: u16 = parse_var("PORT", &port)?;

        Ok(Self {
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            gemini_timeout: Duration::from_secs(match env::var("GEMINI_TIMEOUT_SECS") {
                Ok(v) => parse_var("GEMINI_TIMEOUT_SECS", &v)?,
                Err(_) => 30,
            }),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            gcp_region: env::var("GCP_REGION").unwrap_or_else(|_| "us-west1".to_string()),
            api_url: env::var("API_URL").unwrap_or_else(|_| format!("http://localhost:{}", port)),
            port,
            queue_backend: match env::var("QUEUE_BACKEND") {
                Ok(v) => v.parse()?,
                Err(_) => QueueBackend::CloudTasks,
            },
            store_backend: match env::var("STORE_BACKEND") {
                Ok(v) => v.parse()?,
                Err(_) => StoreBackend::Firestore,
            },
            worker_count: match env::var("WORKER_COUNT") {
                Ok(v) => parse_var::<usize>("WORKER_COUNT", &v)?.max(1),
                Err(_) => 4,
            },
        })
    }

    /// Offline configuration for tests.
    pub fn test_default() -> Self {
        Self {
            gemini_api_url: "http://127.0.0.1:9/generate".to_string(),
            gemini_api_key: "test_gemini_key".to_string(),
            gemini_timeout: Duration::from_secs(2),
            gcp_project_id: "test-project".to_string(),
            gcp_region: "us-west1".to_string(),
            api_url: "http://localhost:8080".to_string(),
            port: 8080,
            queue_backend: QueueBackend::Local,
            store_backend: StoreBackend::Memory,
            worker_count: 2,
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(name, value.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
