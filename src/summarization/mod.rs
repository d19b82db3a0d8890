//! Meeting summarization over a chat-completion collaborator.
//!
//! The instruction template and the `####` transcript delimiters are a
//! prompt-level contract with the model; replies are stored verbatim and
//! never validated against the template.

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::OpenAIConfig;

pub mod providers;

pub use providers::{OpenAIChatProvider, SummaryProvider};

/// Fixed system instruction sent with every summary request.
pub const SUMMARY_PROMPT: &str = "\
Summarize the text delimited by ####.
The text is the transcript of a meeting.

The summary must follow this format:

**Participants**:
- list everyone who speaks or is mentioned as present

**Meeting summary**:
- running prose covering the main topics, at most 300 characters

**Agreements**:
- agreement 1
- agreement 2
- agreement n

**Action items**:
- action item, with the person responsible for it
";

/// User turn: the transcript wrapped in the four-hash delimiter.
pub fn transcript_turn(transcript: &str) -> String {
    format!("####{transcript}####")
}

/// A summary provider ready to be handed a transcript.
pub struct Summarizer {
    provider: Box<dyn SummaryProvider>,
}

impl Summarizer {
    pub fn with_provider(provider_name: &str, config: &OpenAIConfig) -> Result<Self> {
        let provider: Box<dyn SummaryProvider> = match provider_name {
            "openai-chat" => {
                let api_key = config
                    .resolved_api_key()
                    .context("api_key is required for the OpenAI chat provider (set [openai].api_key or OPENAI_API_KEY)")?;

                Box::new(OpenAIChatProvider::new(
                    api_key,
                    config.api_endpoint.clone(),
                    config.chat_model.clone(),
                )?)
            }
            _ => bail!(
                "Unknown summary provider '{}'. Supported providers: openai-chat",
                provider_name
            ),
        };

        info!("Using {} for summarization", provider.name());

        Ok(Self { provider })
    }

    /// Bind an already-constructed provider; used by tests to inject stubs.
    pub fn from_provider(provider: Box<dyn SummaryProvider>) -> Self {
        Self { provider }
    }

    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        info!(
            "Summarizing transcript ({} chars) with {}",
            transcript.len(),
            self.provider.name()
        );
        self.provider.summarize(transcript).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_turn_delimiters() {
        assert_eq!(transcript_turn("hello world"), "####hello world####");
        assert_eq!(transcript_turn(""), "########");
    }

    #[test]
    fn test_prompt_names_every_section() {
        assert!(SUMMARY_PROMPT.contains("**Participants**"));
        assert!(SUMMARY_PROMPT.contains("**Meeting summary**"));
        assert!(SUMMARY_PROMPT.contains("**Agreements**"));
        assert!(SUMMARY_PROMPT.contains("**Action items**"));
        assert!(SUMMARY_PROMPT.contains("300 characters"));
    }
}
