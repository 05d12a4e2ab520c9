// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod consumer;
pub mod extractor;
pub mod gemini;
pub mod prompt;
pub mod queue;
pub mod synthesizer;
pub mod tasks;

pub use consumer::{ActivityConsumer, FallbackReason, ProcessResult};
pub use extractor::ExtractionError;
pub use gemini::{AiGateway, GeminiClient, TransportError};
pub use queue::{spawn_local_workers, ActivityQueue};
pub use tasks::TasksService;
