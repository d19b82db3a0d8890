//! Meeting API endpoints.
//!
//! Provides HTTP endpoints for:
//! - Uploading a recording (POST /meetings)
//! - Listing meetings, newest first (GET /meetings)
//! - Viewing a meeting, generating its summary on first view (GET /meetings/:key)
//! - Downloading the raw audio (GET /meetings/:key/audio)
//! - Saving a title (PUT /meetings/:key/title)

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::pipeline::{IngestOutcome, MeetingPipeline, SessionState, UploadedAudio};
use crate::store::MeetingKey;

/// Shared state for meeting routes.
///
/// The session guard lives for as long as the server process: one server
/// run is one interactive session.
#[derive(Clone)]
pub struct MeetingsState {
    pub pipeline: Arc<MeetingPipeline>,
    pub session: Arc<Mutex<SessionState>>,
}

pub fn router(state: MeetingsState) -> Router {
    Router::new()
        .route("/meetings", get(list_meetings).post(upload_meeting))
        .route("/meetings/:key", get(get_meeting))
        .route("/meetings/:key/audio", get(get_meeting_audio))
        .route("/meetings/:key/title", put(save_title))
        .with_state(state)
}

/// POST /meetings - Ingest an uploaded recording from a multipart form.
async fn upload_meeting(
    State(state): State<MeetingsState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut upload: Option<UploadedAudio> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|name| name.to_string())
            .ok_or_else(|| ApiError::bad_request("'file' part is missing a filename"))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;

        upload = Some(UploadedAudio {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("Missing 'file' multipart part"))?;

    info!("Upload received via API: {}", upload.file_name);

    // Holding the session lock for the whole ingestion serializes uploads,
    // matching the one-at-a-time interaction model.
    let mut session = state.session.lock().await;
    let outcome = state.pipeline.ingest(&mut session, upload).await?;

    match outcome {
        IngestOutcome::Created { key } => Ok(Json(json!({
            "success": true,
            "status": "created",
            "key": key.to_string(),
            "label": key.label(),
        }))),
        IngestOutcome::AlreadyProcessed { file_name } => Ok(Json(json!({
            "success": true,
            "status": "already_processed",
            "message": format!("'{file_name}' was already processed this session"),
        }))),
    }
}

/// GET /meetings - Ordered listing, most recent first.
async fn list_meetings(State(state): State<MeetingsState>) -> ApiResult<Json<Value>> {
    let entries = state.pipeline.list()?;

    let meetings: Vec<Value> = entries
        .iter()
        .map(|entry| {
            json!({
                "key": entry.key.to_string(),
                "label": entry.label,
            })
        })
        .collect();

    Ok(Json(json!({ "meetings": meetings })))
}

/// GET /meetings/:key - Full view; generates the summary on first view.
async fn get_meeting(
    Path(key): Path<String>,
    State(state): State<MeetingsState>,
) -> ApiResult<Json<Value>> {
    let key = parse_key(&key)?;
    let view = state.pipeline.view(&key).await?;

    Ok(Json(json!({
        "key": view.key.to_string(),
        "label": view.key.label(),
        "title": view.title,
        "summary": view.summary,
        "transcript": view.transcript,
        "audio_file": view.audio_file_name,
    })))
}

/// GET /meetings/:key/audio - Raw recording bytes.
async fn get_meeting_audio(
    Path(key): Path<String>,
    State(state): State<MeetingsState>,
) -> ApiResult<Response> {
    let key = parse_key(&key)?;
    let (file_name, bytes) = state.pipeline.store().read_audio(&key)?;

    let content_type = match file_name.rsplit('.').next() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

#[derive(Debug, serde::Deserialize)]
pub struct SaveTitleRequest {
    pub title: String,
}

/// PUT /meetings/:key/title - Save (or overwrite) the meeting title.
async fn save_title(
    Path(key): Path<String>,
    State(state): State<MeetingsState>,
    Json(body): Json<SaveTitleRequest>,
) -> ApiResult<Json<Value>> {
    let key = parse_key(&key)?;
    state.pipeline.save_title(&key, &body.title)?;

    Ok(Json(json!({
        "success": true,
        "key": key.to_string(),
        "title": body.title,
    })))
}

fn parse_key(raw: &str) -> Result<MeetingKey, ApiError> {
    raw.parse::<MeetingKey>().map_err(ApiError::from)
}
