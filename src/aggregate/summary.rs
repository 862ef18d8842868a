//! Summarization pass.

use super::{labelled_blocks, Aggregator};
use crate::error::{Result, TubechatError};
use tracing::{info, instrument};

impl Aggregator<'_> {
    /// Summarize a transcript.
    ///
    /// Each chunk is summarized on its own; several partial summaries are
    /// merged into one with a final call, a single one is returned as is.
    #[instrument(skip(self, transcript), fields(transcript_len = transcript.len()))]
    pub async fn summarize(&self, transcript: &str, max_chunk_cost: usize) -> Result<String> {
        if transcript.trim().is_empty() {
            return Err(TubechatError::NoTranscript);
        }

        let mut summaries = self
            .map_chunks(transcript, max_chunk_cost, "Summarizing", |chunk| {
                self.render(&self.prompts.summary.chunk, &[("chunk", chunk)])
            })
            .await
            .map_err(TubechatError::summary)?;

        info!("Summarized {} chunks", summaries.len());

        if summaries.len() == 1 {
            return Ok(summaries.remove(0));
        }

        let sections = labelled_blocks("Section", &summaries);
        let prompt = self.render(&self.prompts.summary.merge, &[("sections", sections.as_str())]);

        self.completer
            .complete(&prompt)
            .await
            .map_err(TubechatError::summary)
    }
}
