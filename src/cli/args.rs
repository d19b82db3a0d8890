use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meetgpt")]
#[command(about = "Meeting transcription and summarization", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Upload a recording: create a meeting record and transcribe it
    Upload(UploadCliArgs),
    /// List stored meetings, newest first
    List,
    /// Show a meeting, generating its summary on first view
    Show(ShowCliArgs),
    /// Set (or replace) the title of a meeting
    Title(TitleCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct UploadCliArgs {
    /// Path to an audio file (mp3, wav, ogg, flac)
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct ShowCliArgs {
    /// Meeting key (YYYY_MM_DD_HH_MM_SS)
    pub key: String,
    /// Also print the full transcript
    #[arg(short, long)]
    pub transcript: bool,
}

#[derive(ClapArgs, Debug)]
pub struct TitleCliArgs {
    /// Meeting key (YYYY_MM_DD_HH_MM_SS)
    pub key: String,
    /// Title text, stored verbatim
    pub title: String,
}
