use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, error, info};

use super::SummaryProvider;
use crate::summarization::{transcript_turn, SUMMARY_PROMPT};

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

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

pub struct OpenAIChatProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAIChatProvider {
    pub fn new(api_key: String, endpoint: Option<String>, model: String) -> Result<Self> {
        let client = reqwest::Client::new();
        let endpoint =
            endpoint.unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string());

        info!("Initialized OpenAI chat provider: {}", endpoint);

        Ok(Self {
            client,
            api_key,
            endpoint,
            model,
        })
    }
}

impl SummaryProvider for OpenAIChatProvider {
    fn name(&self) -> &'static str {
        "OpenAI Chat API"
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn summarize<'a>(
        &'a self,
        transcript: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            info!("Requesting summary via OpenAI chat completions");

            // Deterministic sampling: temperature pinned to zero, non-streaming.
            let body = ChatRequest {
                model: self.model.clone(),
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: SUMMARY_PROMPT.to_string(),
                    },
                    ChatMessage {
                        role: "user",
                        content: transcript_turn(transcript),
                    },
                ],
                temperature: 0.0,
                stream: false,
            };

            debug!("Sending request to OpenAI with model {}", self.model);

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
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
                    "OpenAI chat request failed with status {}: {}",
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
                    "OpenAI chat request failed with status {}: {}",
                    status,
                    response_text
                ));
            }

            let completion: ChatResponse = serde_json::from_str(&response_text)
                .context("Failed to parse chat completion response")?;

            let text = completion
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .context("Chat completion response contained no choices")?;

            info!("Summary complete: {} chars", text.len());

            Ok(text)
        })
    }
}
