use crate::api::{ApiServer, MeetingsState};
use crate::config::Config;
use crate::pipeline::{MeetingPipeline, SessionState};
use crate::store::ArtifactStore;
use crate::summarization::Summarizer;
use crate::transcription::Transcriber;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub async fn run_service() -> Result<()> {
    info!("Starting MeetGPT service");

    let config = Config::load()?;
    let pipeline = Arc::new(build_pipeline(&config)?);

    // One server run is one interactive session for the duplicate guard.
    let state = MeetingsState {
        pipeline,
        session: Arc::new(Mutex::new(SessionState::new())),
    };

    let api_server = ApiServer::new(state);

    info!("MeetGPT is ready!");
    info!("Upload a recording: curl -F file=@meeting.mp3 http://127.0.0.1:6338/meetings");

    api_server.start().await
}

pub fn build_pipeline(config: &Config) -> Result<MeetingPipeline> {
    let store = ArtifactStore::new(config.meetings_root()?)?;
    let transcriber = Transcriber::with_provider("openai-api", &config.openai)?;
    let summarizer = Summarizer::with_provider("openai-chat", &config.openai)?;

    Ok(MeetingPipeline::new(store, transcriber, summarizer))
}
