//! REST client for the `generateContent` endpoint.

use async_trait::async_trait;
use campo_core::advisory::{
    Advisory, AdvisoryError, AdvisoryRequest, AlertAdvisor, FieldImageGenerator,
};
use serde_json::json;

use crate::prompt;
use crate::response::GenerateContentResponse;

/// Public endpoint of the hosted service.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the generation service.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

/// Errors from the generation service client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response did not carry what we asked for.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<GeminiError> for AdvisoryError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Request(e) => AdvisoryError::Transport(e.to_string()),
            GeminiError::ApiError { status, body } => AdvisoryError::Status { status, body },
            GeminiError::Decode(msg) => AdvisoryError::Malformed(msg),
        }
    }
}

impl GeminiClient {
    /// Create a client for the service at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            base_url,
            api_key,
            text_model,
            image_model,
        )
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            text_model: text_model.into(),
            image_model: image_model.into(),
        }
    }

    /// Ask the text model for a `{message, severity}` assessment.
    pub async fn assess_conditions(
        &self,
        request: &AdvisoryRequest,
    ) -> Result<Advisory, GeminiError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt::advisory_prompt(request) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": prompt::advisory_schema()
            }
        });

        let response = self.generate_content(&self.text_model, &body).await?;
        let advisory = response.advisory()?;
        tracing::debug!(
            crop_type = %request.crop_type,
            severity = ?advisory.severity,
            "Received advisory"
        );
        Ok(advisory)
    }

    /// Ask the image model for a field picture. Returns a `data:` URI.
    pub async fn generate_field_image(&self, description: &str) -> Result<String, GeminiError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt::field_image_prompt(description) }]
            }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"]
            }
        });

        let response = self.generate_content(&self.image_model, &body).await?;
        response.image_data_uri()
    }

    // ---- private helpers ----

    async fn generate_content(
        &self,
        model: &str,
        body: &serde_json::Value,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code, capturing the body
    /// on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AlertAdvisor for GeminiClient {
    async fn assess(&self, request: &AdvisoryRequest) -> Result<Advisory, AdvisoryError> {
        Ok(self.assess_conditions(request).await?)
    }
}

#[async_trait]
impl FieldImageGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        Ok(self.generate_field_image(prompt).await?)
    }
}
