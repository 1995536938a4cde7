//! Boundary to the hosted generation service.
//!
//! The service is a black box behind two traits: [`AlertAdvisor`] for the
//! text assessment and [`FieldImageGenerator`] for field imagery. Callers
//! never see its failures: [`advise_with_fallback`] and
//! [`image_with_fallback`] bound every call with a timeout and substitute
//! fixed values on any error.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::alert::Severity;
use crate::reading::SensorValue;
use crate::simulation::GrowthStage;

/// Message used whenever the advisor cannot produce an assessment.
pub const FALLBACK_MESSAGE: &str = "AI recommendation unavailable";

/// An assessment of current field conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub message: String,
    pub severity: Severity,
}

impl Advisory {
    /// The fixed result substituted for any failed advisor call.
    pub fn fallback() -> Self {
        Self {
            message: FALLBACK_MESSAGE.to_string(),
            severity: Severity::Attention,
        }
    }
}

/// Everything the advisor is told about a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    pub crop_type: String,
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_stage: Option<GrowthStage>,
    pub sensor_values: BTreeMap<String, SensorValue>,
}

/// Failure modes of the generation service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    /// Network, DNS or TLS failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No answer within the allotted time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Text-completion side of the generation service.
#[async_trait]
pub trait AlertAdvisor: Send + Sync {
    async fn assess(&self, request: &AdvisoryRequest) -> Result<Advisory, AdvisoryError>;
}

/// Image side of the generation service. Returns a URL, which may be a
/// `data:` URI.
#[async_trait]
pub trait FieldImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError>;
}

/// Ask the advisor, bounded by `timeout`. Any failure yields
/// [`Advisory::fallback`].
pub async fn advise_with_fallback(
    advisor: &dyn AlertAdvisor,
    request: &AdvisoryRequest,
    timeout: Duration,
) -> Advisory {
    let outcome = match tokio::time::timeout(timeout, advisor.assess(request)).await {
        Ok(result) => result,
        Err(_) => Err(AdvisoryError::Timeout(timeout)),
    };

    match outcome {
        Ok(advisory) => advisory,
        Err(e) => {
            tracing::warn!(
                error = %e,
                crop_type = %request.crop_type,
                field_name = %request.field_name,
                "Advisor call failed, using fallback"
            );
            Advisory::fallback()
        }
    }
}

/// Generate a field image, bounded by `timeout`. Any failure yields
/// `placeholder`.
pub async fn image_with_fallback(
    generator: &dyn FieldImageGenerator,
    prompt: &str,
    timeout: Duration,
    placeholder: &str,
) -> String {
    let outcome = match tokio::time::timeout(timeout, generator.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(AdvisoryError::Timeout(timeout)),
    };

    match outcome {
        Ok(url) if !url.is_empty() => url,
        Ok(_) => {
            tracing::warn!("Image generator returned an empty URL, using placeholder");
            placeholder.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Image generation failed, using placeholder");
            placeholder.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
