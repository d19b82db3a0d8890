//! REST API server for MeetGPT.
//!
//! Provides HTTP endpoints for:
//! - Uploading meeting recordings
//! - Browsing stored meetings
//! - On-demand summary generation (first view of a meeting)
//! - Title management

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub use routes::meetings::MeetingsState;

pub struct ApiServer {
    port: u16,
    state: MeetingsState,
}

impl ApiServer {
    pub fn new(state: MeetingsState) -> Self {
        Self {
            port: 6338, // MEET on a phone keypad
            state,
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            // Root and version endpoints
            .route("/", get(status))
            .route("/version", get(version))
            // Meeting endpoints
            .merge(routes::meetings::router(self.state))
            // Meeting recordings run long; the default 2 MB body cap is far too small
            .layer(DefaultBodyLimit::max(256 * 1024 * 1024))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /                     - Service info");
        info!("  GET  /version              - Get version info");
        info!("  POST /meetings             - Upload a recording (multipart 'file')");
        info!("  GET  /meetings             - List meetings, newest first");
        info!("  GET  /meetings/:key        - View a meeting (generates summary on first view)");
        info!("  GET  /meetings/:key/audio  - Download the raw recording");
        info!("  PUT  /meetings/:key/title  - Save the meeting title");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "meetgpt",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "meetgpt"
    }))
}
