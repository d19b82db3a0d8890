use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::OpenAIConfig;

pub mod providers;

pub use providers::{OpenAIProvider, TranscriptionProvider};

/// A transcription provider bound to the configured language hint.
pub struct Transcriber {
    provider: Box<dyn TranscriptionProvider>,
    language: String,
}

impl Transcriber {
    pub fn with_provider(provider_name: &str, config: &OpenAIConfig) -> Result<Self> {
        let provider: Box<dyn TranscriptionProvider> = match provider_name {
            "openai-api" => {
                let api_key = config
                    .resolved_api_key()
                    .context("api_key is required for the OpenAI transcription provider (set [openai].api_key or OPENAI_API_KEY)")?;

                Box::new(OpenAIProvider::new(
                    api_key,
                    config.api_endpoint.clone(),
                    config.transcription_model.clone(),
                )?)
            }
            _ => bail!(
                "Unknown transcription provider '{}'. Supported providers: openai-api",
                provider_name
            ),
        };

        info!("Using {} for transcription", provider.name());

        Ok(Self {
            provider,
            language: config.language.clone(),
        })
    }

    /// Bind an already-constructed provider; used by tests to inject stubs.
    pub fn from_provider(provider: Box<dyn TranscriptionProvider>, language: &str) -> Self {
        Self {
            provider,
            language: language.to_string(),
        }
    }

    pub async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        info!(
            "Transcribing audio file: {:?} with {}",
            audio_path,
            self.provider.name()
        );
        self.provider.transcribe(audio_path, &self.language).await
    }
}
