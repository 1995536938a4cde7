//! Client for the hosted generation service.
//!
//! [`GeminiClient`] speaks the `generateContent` JSON API and implements
//! the [`campo_core::advisory`] boundary traits for both condition
//! assessments and field imagery. [`Unconfigured`] stands in when no API
//! key is available; every call fails, so callers fall back.

use async_trait::async_trait;
use campo_core::advisory::{
    Advisory, AdvisoryError, AdvisoryRequest, AlertAdvisor, FieldImageGenerator,
};

pub mod client;
pub mod prompt;
pub mod response;

pub use client::{GeminiClient, GeminiError, DEFAULT_BASE_URL};

/// Generation service placeholder used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl AlertAdvisor for Unconfigured {
    async fn assess(&self, _request: &AdvisoryRequest) -> Result<Advisory, AdvisoryError> {
        Err(AdvisoryError::Transport("no API key configured".into()))
    }
}

#[async_trait]
impl FieldImageGenerator for Unconfigured {
    async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Transport("no API key configured".into()))
    }
}
