//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::session::Session;
use anyhow::Result;

/// Run the summarize command.
pub async fn run_summarize(url: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let mut session = Session::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let loaded = session.load(url).await.map(|t| t.video_id.clone());
    spinner.finish_and_clear();
    let video_id = loaded?;

    Output::info(&format!("Summarizing {} with {}", video_id, session.model()));

    match session.summarize().await {
        Ok(summary) => {
            println!("\n{}\n", summary);
            Ok(())
        }
        Err(e) => {
            Output::error(&e.to_string());
            Err(e.into())
        }
    }
}
