use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{ExtractionClient, ExtractionClientError};
use crate::domain::PrescriptionImage;

pub const EXTRACTION_PROMPT: &str = "Extract ONLY medicine names and their dosage from this prescription.\n\
Output strictly as a JSON array of objects like:\n\
[{\"name\": \"Augmentin 625 Duo Tablet\", \"dosage\": \"1 tab twice daily\"}]\n\
If dosage is not available, set dosage to \"\" (empty string). No extra text, no markdown.";

/// Explicit adapter configuration; no process-wide credential state.
#[derive(Debug, Clone)]
pub struct VlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

/// Talks to any OpenAI-compatible chat completions endpoint hosting a
/// vision-language model, sending the prescription image inline as a base64
/// data URI.
pub struct VlmExtractionClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl VlmExtractionClient {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(config: VlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            api_key: config.api_key,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl ExtractionClient for VlmExtractionClient {
    #[tracing::instrument(
        skip(self, image),
        fields(
            filename = %prescription.filename,
            mime = prescription.format.as_mime()
        )
    )]
    async fn extract(
        &self,
        image: &[u8],
        prescription: &PrescriptionImage,
    ) -> Result<String, ExtractionClientError> {
        let b64 = general_purpose::STANDARD.encode(image);
        let data_uri = format!("data:{};base64,{b64}", prescription.format.as_mime());

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image_url",
                            "image_url": { "url": data_uri }
                        },
                        {
                            "type": "text",
                            "text": EXTRACTION_PROMPT
                        }
                    ]
                }
            ],
            "max_tokens": 1024,
            "temperature": 0.0,
            "stream": false
        });

        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionClientError::ApiRequestFailed(format!("vlm request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ExtractionClientError::ApiRequestFailed(format!(
                "vlm returned {status}: {text}"
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractionClientError::ApiRequestFailed(format!("vlm read: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            let raw_text = String::from_utf8_lossy(&raw_bytes);
            tracing::error!(raw_response = %raw_text, "Failed to parse VLM completion JSON");
            ExtractionClientError::InvalidResponse(format!("vlm JSON parse: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}
