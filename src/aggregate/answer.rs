//! Question answering pass.

use super::{labelled_blocks, Aggregator};
use crate::error::{Result, TubechatError};
use tracing::{debug, info, instrument};

/// Reply the model is told to give when a chunk does not answer the question.
pub const NO_RELEVANT_INFO: &str = "NO_RELEVANT_INFO";

fn is_relevant(reply: &str) -> bool {
    reply.trim() != NO_RELEVANT_INFO
}

impl Aggregator<'_> {
    /// Answer a question from a transcript.
    ///
    /// Every chunk is asked the question; replies equal to
    /// [`NO_RELEVANT_INFO`] are dropped. Several remaining answers are merged
    /// with a final call, a single one is returned as is, and none yields the
    /// configured not-found message without another call.
    #[instrument(skip(self, transcript), fields(transcript_len = transcript.len()))]
    pub async fn answer(
        &self,
        transcript: &str,
        question: &str,
        max_chunk_cost: usize,
    ) -> Result<String> {
        if transcript.trim().is_empty() {
            return Err(TubechatError::NoTranscript);
        }

        let replies = self
            .map_chunks(transcript, max_chunk_cost, "Analyzing", |chunk| {
                self.render(
                    &self.prompts.answer.chunk,
                    &[
                        ("chunk", chunk),
                        ("question", question),
                        ("sentinel", NO_RELEVANT_INFO),
                    ],
                )
            })
            .await
            .map_err(TubechatError::answer)?;

        let total = replies.len();
        let mut answers: Vec<String> = replies.into_iter().filter(|r| is_relevant(r)).collect();
        info!("{} of {} chunks held relevant information", answers.len(), total);

        match answers.len() {
            0 => {
                debug!("No chunk answered the question");
                Ok(self.prompts.answer.not_found.clone())
            }
            1 => Ok(answers.remove(0)),
            _ => {
                let blocks = labelled_blocks("Info", &answers);
                let prompt = self.render(
                    &self.prompts.answer.merge,
                    &[("question", question), ("answers", blocks.as_str())],
                );
                self.completer
                    .complete(&prompt)
                    .await
                    .map_err(TubechatError::answer)
            }
        }
    }
}
