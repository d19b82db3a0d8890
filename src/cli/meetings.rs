use anyhow::{Context, Result};

use crate::app;
use crate::config::Config;
use crate::store::{ArtifactStore, Field, MeetingKey};

use super::args::{ShowCliArgs, TitleCliArgs};

pub fn handle_list_command() -> Result<()> {
    let config = Config::load()?;
    let store = ArtifactStore::new(config.meetings_root()?)?;

    let entries = store.list()?;
    if entries.is_empty() {
        println!("No meetings stored yet.");
        return Ok(());
    }

    println!("Found {} meeting(s):\n", entries.len());
    for entry in entries {
        println!("{}  {}", entry.key, entry.label);
    }

    println!("\nTo view a meeting, use: meetgpt show <KEY>");

    Ok(())
}

pub async fn handle_show_command(args: ShowCliArgs) -> Result<()> {
    let key: MeetingKey = args
        .key
        .parse()
        .with_context(|| format!("'{}' is not a valid meeting key", args.key))?;

    let config = Config::load()?;
    let pipeline = app::build_pipeline(&config)?;

    let view = pipeline.view(&key).await?;

    match &view.title {
        Some(title) => println!("## {} ##", title),
        None => println!("## {} (untitled) ##", key.label()),
    }
    println!();
    println!("{}", view.summary);

    if args.transcript {
        println!("\n### Transcript ###");
        println!("{}", view.transcript);
    }

    println!("\nRecording: {} ({} bytes)", view.audio_file_name, view.audio.len());

    Ok(())
}

pub fn handle_title_command(args: TitleCliArgs) -> Result<()> {
    let key: MeetingKey = args
        .key
        .parse()
        .with_context(|| format!("'{}' is not a valid meeting key", args.key))?;

    // Titles only touch the store; no collaborators needed.
    let config = Config::load()?;
    let store = ArtifactStore::new(config.meetings_root()?)?;
    store.write_field(&key, Field::Title, &args.title)?;

    println!("Title saved for {}: {}", key, args.title);

    Ok(())
}
