//! Meeting pipeline orchestrator.
//!
//! Ingestion: upload → dedup guard → folder → raw audio → transcription →
//! transcript field. Viewing: transcript read → lazy one-time summary →
//! title/summary/transcript/audio bundle. Collaborators are injected via
//! the provider traits so tests can substitute deterministic stubs.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::store::{ArtifactStore, Field, MeetingEntry, MeetingKey};
use crate::summarization::Summarizer;
use crate::transcription::Transcriber;

pub mod session;

pub use session::SessionState;

/// Audio container formats accepted at upload.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "flac"];

/// An uploaded recording: original filename plus raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Outcome of an ingestion attempt.
#[derive(Debug)]
pub enum IngestOutcome {
    /// A new meeting record was created and transcribed.
    Created { key: MeetingKey },
    /// The filename matched the last accepted upload of this session.
    AlreadyProcessed { file_name: String },
}

/// Everything the presentation layer needs to render one meeting.
#[derive(Debug)]
pub struct MeetingView {
    pub key: MeetingKey,
    pub title: Option<String>,
    pub summary: String,
    pub transcript: String,
    pub audio_file_name: String,
    pub audio: Vec<u8>,
}

pub struct MeetingPipeline {
    store: ArtifactStore,
    transcriber: Transcriber,
    summarizer: Summarizer,
}

impl MeetingPipeline {
    pub fn new(store: ArtifactStore, transcriber: Transcriber, summarizer: Summarizer) -> Self {
        Self {
            store,
            transcriber,
            summarizer,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn list(&self) -> Result<Vec<MeetingEntry>> {
        Ok(self.store.list()?)
    }

    /// Ingest an upload: create the meeting record, persist the raw bytes,
    /// transcribe, persist the transcript.
    ///
    /// A transcription failure propagates and leaves the transcript field
    /// unwritten; the folder and audio file remain on disk.
    pub async fn ingest(
        &self,
        session: &mut SessionState,
        upload: UploadedAudio,
    ) -> Result<IngestOutcome> {
        check_extension(&upload.file_name)?;

        if session.is_duplicate(&upload.file_name) {
            info!(
                "Upload '{}' already processed this session, skipping",
                upload.file_name
            );
            return Ok(IngestOutcome::AlreadyProcessed {
                file_name: upload.file_name,
            });
        }

        session.mark_accepted(&upload.file_name);

        let key = self.store.create_meeting()?;
        let audio_path = self.store.write_audio(&key, &upload.file_name, &upload.bytes)?;
        info!(
            "Meeting {} created from '{}' ({} bytes)",
            key,
            upload.file_name,
            upload.bytes.len()
        );

        let transcript = self.transcriber.transcribe(&audio_path).await?;
        self.store.write_field(&key, Field::Transcript, &transcript)?;
        info!(
            "Meeting {} transcription complete: {} chars",
            key,
            transcript.len()
        );

        Ok(IngestOutcome::Created { key })
    }

    /// Assemble a meeting for rendering, generating the summary on first
    /// view. The summary is write-once: an existing summary file (even an
    /// empty one) is returned as-is with no collaborator call.
    pub async fn view(&self, key: &MeetingKey) -> Result<MeetingView> {
        let transcript = self.store.read_text(key, Field::Transcript)?;
        if transcript.is_empty() {
            warn!("Meeting {} has no transcript", key);
        }

        let summary = match self.store.read_field(key, Field::Summary)? {
            Some(summary) => summary,
            None => {
                let summary = self.summarizer.summarize(&transcript).await?;
                self.store.write_field(key, Field::Summary, &summary)?;
                info!("Meeting {} summary generated: {} chars", key, summary.len());
                summary
            }
        };

        let title = self.store.read_field(key, Field::Title)?;
        let (audio_file_name, audio) = self.store.read_audio(key)?;

        Ok(MeetingView {
            key: key.clone(),
            title,
            summary,
            transcript,
            audio_file_name,
            audio,
        })
    }

    /// Save the user-supplied title. Verbatim, no validation, rewritable.
    pub fn save_title(&self, key: &MeetingKey, title: &str) -> Result<()> {
        self.store.write_field(key, Field::Title, title)?;
        info!("Meeting {} title saved", key);
        Ok(())
    }
}

fn check_extension(file_name: &str) -> Result<()> {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => bail!(
            "Unsupported format '{}'. Supported formats: {}",
            file_name,
            SUPPORTED_EXTENSIONS.join(", ")
        ),
    }
}
