use anyhow::{Context, Result};
use serde::Deserialize;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tokio::fs;
use tracing::{debug, error, info};

use super::TranscriptionProvider;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    r#type: Option<String>,
    code: Option<String>,
}

pub struct OpenAIProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String, endpoint: Option<String>, model: String) -> Result<Self> {
        let client = reqwest::Client::new();
        let endpoint = endpoint
            .unwrap_or_else(|| "https://api.openai.com/v1/audio/transcriptions".to_string());

        info!("Initialized OpenAI transcription provider: {}", endpoint);

        Ok(Self {
            client,
            api_key,
            endpoint,
            model,
        })
    }
}

impl TranscriptionProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "OpenAI API"
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn transcribe<'a>(
        &'a self,
        audio_path: &'a Path,
        language: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            info!("Transcribing audio file via OpenAI API: {:?}", audio_path);

            let bytes = fs::read(audio_path)
                .await
                .context("Failed to read audio file")?;

            let file_name = audio_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "audio".to_string());

            let form = reqwest::multipart::Form::new()
                .text("model", self.model.clone())
                .text("language", language.to_string())
                .text("response_format", "text")
                .part(
                    "file",
                    reqwest::multipart::Part::bytes(bytes).file_name(file_name),
                );

            debug!("Sending request to OpenAI with model {}", self.model);

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .multipart(form)
                .send()
                .await
                .context("Failed to send request to OpenAI API")?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .context("Failed to read response body")?;

            if !status.is_success() {
                error!(
                    "OpenAI transcription request failed with status {}: {}",
                    status, response_text
                );

                if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                    return Err(anyhow::anyhow!(
                        "OpenAI API error: {} (type: {:?}, code: {:?})",
                        error_response.error.message,
                        error_response.error.r#type,
                        error_response.error.code
                    ));
                }

                return Err(anyhow::anyhow!(
                    "OpenAI transcription request failed with status {}: {}",
                    status,
                    response_text
                ));
            }

            // response_format=text returns the plain transcript body.
            let text = response_text.trim().to_string();
            info!("Transcription complete: {} chars", text.len());
            debug!("Raw transcription: {}", text);

            Ok(text)
        })
    }
}
