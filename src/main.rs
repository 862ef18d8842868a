//! tubechat CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubechat::cli::{commands, Cli, Commands};
use tubechat::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli
        .config
        .as_deref()
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path);
    let mut settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tubechat={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    if let Some(model) = &cli.model {
        settings.llm.model = model.clone();
    }

    // Execute command
    match cli.command {
        None => {
            commands::run_interactive(None, settings).await?;
        }

        Some(Commands::Interactive { url }) => {
            commands::run_interactive(url, settings).await?;
        }

        Some(Commands::Summarize { url }) => {
            commands::run_summarize(&url, settings).await?;
        }

        Some(Commands::Ask { url, question }) => {
            commands::run_ask(&url, &question, settings).await?;
        }

        Some(Commands::Transcript { url, output, format }) => {
            commands::run_transcript(&url, output, &format, settings).await?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(&action, config_path, settings)?;
        }
    }

    Ok(())
}
