//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::session::Session;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(url: &str, question: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let mut session = Session::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let loaded = session.load(url).await.map(|_| ());
    spinner.finish_and_clear();
    loaded?;

    match session.answer(question).await {
        Ok(answer) => {
            println!("\n{}\n", answer);
            Ok(())
        }
        Err(e) => {
            Output::error(&e.to_string());
            Err(e.into())
        }
    }
}
