//! Map-reduce over transcript chunks.
//!
//! A transcript is split into chunks that fit a model request, each chunk is
//! sent through the completer in order (map), and when more than one partial
//! result comes back they are merged with one final completion (reduce).
//! Chunks are processed strictly one after another so that results keep
//! transcript order; the first failed call aborts the whole run.

mod answer;
mod summary;

pub use answer::NO_RELEVANT_INFO;

use crate::chunking::chunk_text;
use crate::completion::Completer;
use crate::config::Prompts;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use tracing::debug;

/// Runs the summarization and question answering pipelines.
pub struct Aggregator<'a> {
    completer: &'a dyn Completer,
    prompts: &'a Prompts,
    show_progress: bool,
}

impl<'a> Aggregator<'a> {
    pub fn new(completer: &'a dyn Completer, prompts: &'a Prompts) -> Self {
        Self {
            completer,
            prompts,
            show_progress: false,
        }
    }

    /// Draw a progress bar on stderr while chunks are processed.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Split `transcript` and run `render(chunk)` through the completer for each chunk.
    async fn map_chunks<F>(
        &self,
        transcript: &str,
        max_chunk_cost: usize,
        label: &str,
        render: F,
    ) -> Result<Vec<String>>
    where
        F: Fn(&str) -> String,
    {
        let chunks = chunk_text(transcript, max_chunk_cost);
        debug!("Split transcript into {} chunks (ceiling {})", chunks.len(), max_chunk_cost);

        let pb = self.progress_bar(chunks.len(), label);
        let mut results = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            match self.completer.complete(&render(chunk)).await {
                Ok(reply) => results.push(reply),
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(results)
    }

    fn progress_bar(&self, len: usize, label: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} {msg} [{bar:30.cyan/blue}] part {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb.set_message(label.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    fn render(&self, template: &str, vars: &[(&str, &str)]) -> String {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.prompts.render_with_custom(template, &vars)
    }
}

/// Join partial results as `"{label} N:\n{text}"` blocks, numbered from 1.
fn labelled_blocks(label: &str, parts: &[String]) -> String {
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| format!("{} {}:\n{}", label, i + 1, part))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_blocks() {
        let parts = vec!["first".to_string(), "second".to_string()];
        assert_eq!(
            labelled_blocks("Section", &parts),
            "Section 1:\nfirst\n\nSection 2:\nsecond"
        );
        assert_eq!(labelled_blocks("Info", &[]), "");
    }
}
