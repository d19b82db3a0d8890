use anyhow::{bail, Context, Result};

use crate::app;
use crate::config::Config;
use crate::pipeline::{IngestOutcome, SessionState, UploadedAudio};

use super::args::UploadCliArgs;

pub async fn handle_upload_command(args: UploadCliArgs) -> Result<()> {
    if !args.file.exists() {
        bail!("Audio file not found: {:?}", args.file);
    }

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .context("Audio path has no filename")?;

    let bytes = std::fs::read(&args.file).context("Failed to read audio file")?;

    let config = Config::load()?;
    let pipeline = app::build_pipeline(&config)?;

    // Each CLI invocation is its own session; the duplicate guard does not
    // carry over between runs.
    let mut session = SessionState::new();

    match pipeline
        .ingest(&mut session, UploadedAudio { file_name, bytes })
        .await?
    {
        IngestOutcome::Created { key } => {
            println!("Meeting created: {} ({})", key, key.label());
            println!("To view it, use: meetgpt show {}", key);
        }
        IngestOutcome::AlreadyProcessed { file_name } => {
            println!("'{}' was already processed this session, nothing to do.", file_name);
        }
    }

    Ok(())
}
