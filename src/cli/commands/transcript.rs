//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{
    format_transcript, OutputFormat, Transcript, TranscriptSource, YtDlpTranscriptSource,
};
use crate::video::VideoLinkParser;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    output: Option<String>,
    format: &str,
    settings: Settings,
) -> Result<()> {
    let output_format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    if let Err(e) = preflight::check(Operation::Transcript, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let video_id = VideoLinkParser::new().parse(url)?;
    let source = YtDlpTranscriptSource::with_settings(&settings.transcript);

    let spinner = Output::spinner("Fetching transcript...");
    let fetched = source.fetch(&video_id).await;
    spinner.finish_and_clear();

    let transcript = Transcript::new(video_id, fetched?);
    let output_str = format_transcript(&transcript, output_format)?;

    match output.as_deref() {
        None | Some("-") => println!("{}", output_str),
        Some(path) => {
            std::fs::write(path, &output_str)?;
            Output::success(&format!(
                "Transcript saved to {} ({} segments)",
                path,
                transcript.segments.len()
            ));
        }
    }

    Ok(())
}
