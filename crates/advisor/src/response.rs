//! `generateContent` response shapes and extraction of the parts we use.

use campo_core::advisory::Advisory;
use serde::Deserialize;

use crate::client::GeminiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

/// Base64 payload returned for generated media.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    /// Decode the first text part as an [`Advisory`].
    pub fn advisory(&self) -> Result<Advisory, GeminiError> {
        let text = self
            .parts()
            .find_map(|p| p.text.as_deref())
            .ok_or_else(|| GeminiError::Decode("response has no text part".into()))?;

        let advisory: Advisory = serde_json::from_str(text.trim())
            .map_err(|e| GeminiError::Decode(format!("advisory JSON: {e}")))?;

        if advisory.message.trim().is_empty() {
            return Err(GeminiError::Decode("advisory message is empty".into()));
        }
        Ok(advisory)
    }

    /// The first inline image as a `data:` URI.
    pub fn image_data_uri(&self) -> Result<String, GeminiError> {
        self.parts()
            .find_map(|p| p.inline_data.as_ref())
            .filter(|d| !d.data.is_empty())
            .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
            .ok_or_else(|| GeminiError::Decode("response has no image part".into()))
    }
}
