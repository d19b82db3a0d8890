use anyhow::Result;
use clap::Parser;
use meetgpt::{
    app,
    cli::{
        handle_list_command, handle_show_command, handle_title_command, handle_upload_command,
        Cli, CliCommand,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("MeetGPT {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::Upload(args)) => {
            handle_upload_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::List) => {
            handle_list_command()?;
            return Ok(());
        }
        Some(CliCommand::Show(args)) => {
            handle_show_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Title(args)) => {
            handle_title_command(args)?;
            return Ok(());
        }
        None => {}
    }

    app::run_service().await
}
