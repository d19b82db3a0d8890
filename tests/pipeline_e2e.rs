//! End-to-end pipeline scenario with stubbed collaborators.
//!
//! Covers the full lifecycle: upload → meeting folder → transcript →
//! lazy summary on first view → cached summary on second view.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use meetgpt::pipeline::{IngestOutcome, MeetingPipeline, SessionState, UploadedAudio};
use meetgpt::store::{ArtifactStore, Field, MeetingKey};
use meetgpt::summarization::{Summarizer, SummaryProvider};
use meetgpt::transcription::{Transcriber, TranscriptionProvider};

const STUB_TRANSCRIPT: &str = "hello world";
const STUB_SUMMARY: &str = "**Meeting summary**:\n- a stubbed summary";

struct StubTranscriber {
    calls: Arc<AtomicUsize>,
}

impl TranscriptionProvider for StubTranscriber {
    fn name(&self) -> &'static str {
        "stub-transcriber"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn transcribe<'a>(
        &'a self,
        _audio_path: &'a Path,
        _language: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Ok(STUB_TRANSCRIPT.to_string()) })
    }
}

struct StubSummarizer {
    calls: Arc<AtomicUsize>,
}

impl SummaryProvider for StubSummarizer {
    fn name(&self) -> &'static str {
        "stub-summarizer"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn summarize<'a>(
        &'a self,
        _transcript: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Ok(STUB_SUMMARY.to_string()) })
    }
}

struct Harness {
    _dir: TempDir,
    pipeline: MeetingPipeline,
    transcribe_calls: Arc<AtomicUsize>,
    summarize_calls: Arc<AtomicUsize>,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();
    let transcribe_calls = Arc::new(AtomicUsize::new(0));
    let summarize_calls = Arc::new(AtomicUsize::new(0));

    let pipeline = MeetingPipeline::new(
        store,
        Transcriber::from_provider(
            Box::new(StubTranscriber {
                calls: transcribe_calls.clone(),
            }),
            "en",
        ),
        Summarizer::from_provider(Box::new(StubSummarizer {
            calls: summarize_calls.clone(),
        })),
    );

    Harness {
        _dir: dir,
        pipeline,
        transcribe_calls,
        summarize_calls,
    }
}

#[tokio::test]
async fn test_upload_then_view_lifecycle() {
    let h = harness();
    let mut session = SessionState::new();

    // Upload: one meeting folder, transcript persisted from the stub.
    let outcome = h
        .pipeline
        .ingest(
            &mut session,
            UploadedAudio {
                file_name: "meeting.wav".to_string(),
                bytes: b"RIFFaudio".to_vec(),
            },
        )
        .await
        .unwrap();

    let key = match outcome {
        IngestOutcome::Created { key } => key,
        other => panic!("expected Created, got {:?}", other),
    };

    assert!(key.as_str().parse::<MeetingKey>().is_ok());
    assert_eq!(h.transcribe_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.pipeline.store().read_text(&key, Field::Transcript).unwrap(),
        STUB_TRANSCRIPT
    );

    let entries = h.pipeline.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, key);

    // First view: exactly one summarizer call, result persisted.
    let first = h.pipeline.view(&key).await.unwrap();
    assert_eq!(first.summary, STUB_SUMMARY);
    assert_eq!(first.transcript, STUB_TRANSCRIPT);
    assert_eq!(first.audio_file_name, "meeting.wav");
    assert_eq!(first.audio, b"RIFFaudio");
    assert_eq!(h.summarize_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.pipeline.store().read_field(&key, Field::Summary).unwrap(),
        Some(STUB_SUMMARY.to_string())
    );

    // Second view: zero additional calls, same stored text.
    let second = h.pipeline.view(&key).await.unwrap();
    assert_eq!(second.summary, STUB_SUMMARY);
    assert_eq!(h.summarize_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_duplicate_name_is_skipped_within_session() {
    let h = harness();
    let mut session = SessionState::new();

    let first = h
        .pipeline
        .ingest(
            &mut session,
            UploadedAudio {
                file_name: "a.mp3".to_string(),
                bytes: b"one".to_vec(),
            },
        )
        .await
        .unwrap();
    assert!(matches!(first, IngestOutcome::Created { .. }));

    // Different bytes, same name: skipped by the name-based guard.
    let second = h
        .pipeline
        .ingest(
            &mut session,
            UploadedAudio {
                file_name: "a.mp3".to_string(),
                bytes: b"two".to_vec(),
            },
        )
        .await
        .unwrap();
    assert!(matches!(second, IngestOutcome::AlreadyProcessed { .. }));
    assert_eq!(h.pipeline.list().unwrap().len(), 1);
}

#[tokio::test]
async fn test_title_saved_twice_reads_back_second_value() {
    let h = harness();
    let mut session = SessionState::new();

    let key = match h
        .pipeline
        .ingest(
            &mut session,
            UploadedAudio {
                file_name: "meeting.wav".to_string(),
                bytes: b"RIFF".to_vec(),
            },
        )
        .await
        .unwrap()
    {
        IngestOutcome::Created { key } => key,
        other => panic!("expected Created, got {:?}", other),
    };

    h.pipeline.save_title(&key, "Kickoff").unwrap();
    h.pipeline.save_title(&key, "Kickoff v2").unwrap();

    let view = h.pipeline.view(&key).await.unwrap();
    assert_eq!(view.title.as_deref(), Some("Kickoff v2"));

    let entries = h.pipeline.list().unwrap();
    assert!(entries[0].label.ends_with(" - Kickoff v2"));
}
