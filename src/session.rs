//! Interactive session state.
//!
//! A session owns the currently loaded transcript and the record of every
//! summary and answer produced during the run. Nothing is persisted; the
//! history lives as long as the process.

use crate::aggregate::Aggregator;
use crate::completion::{Completer, OpenAICompleter};
use crate::config::{ChunkingSettings, Prompts, Settings};
use crate::error::{Result, TubechatError};
use crate::transcript::{Transcript, TranscriptSource, YtDlpTranscriptSource};
use crate::video::VideoLinkParser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// One completed interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HistoryEntry {
    Summary {
        content: String,
        created_at: DateTime<Utc>,
    },
    Chat {
        question: String,
        answer: String,
        created_at: DateTime<Utc>,
    },
}

impl HistoryEntry {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            HistoryEntry::Summary { created_at, .. } | HistoryEntry::Chat { created_at, .. } => {
                *created_at
            }
        }
    }
}

/// State for a single run: transcript, history and collaborators.
pub struct Session {
    source: Box<dyn TranscriptSource>,
    completer: Box<dyn Completer>,
    prompts: Prompts,
    chunking: ChunkingSettings,
    links: VideoLinkParser,
    show_progress: bool,
    transcript: Option<Transcript>,
    history: Vec<HistoryEntry>,
}

impl Session {
    /// Create a session from explicit collaborators.
    pub fn new(
        source: Box<dyn TranscriptSource>,
        completer: Box<dyn Completer>,
        prompts: Prompts,
        chunking: ChunkingSettings,
    ) -> Self {
        Self {
            source,
            completer,
            prompts,
            chunking,
            links: VideoLinkParser::new(),
            show_progress: false,
            transcript: None,
            history: Vec::new(),
        }
    }

    /// Create a session with the yt-dlp caption source and the configured chat endpoint.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let completer = OpenAICompleter::from_settings(&settings.llm)?;
        info!(
            "Using model {} at {}",
            settings.llm.model, settings.llm.endpoint
        );

        Ok(Self::new(
            Box::new(YtDlpTranscriptSource::with_settings(&settings.transcript)),
            Box::new(completer),
            prompts,
            settings.chunking.clone(),
        )
        .with_progress(settings.general.show_progress))
    }

    /// Show progress bars while chunks are processed.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Fetch the transcript for a video link or ID and make it current.
    ///
    /// A failed fetch leaves the previously loaded transcript in place.
    #[instrument(skip(self))]
    pub async fn load(&mut self, input: &str) -> Result<&Transcript> {
        let video_id = self.links.parse(input)?;
        let segments = self.source.fetch(&video_id).await?;

        let transcript = Transcript::new(video_id, segments);
        if transcript.is_empty() {
            return Err(TubechatError::TranscriptUnavailable(format!(
                "transcript for video {} is empty",
                transcript.video_id
            )));
        }

        info!(
            "Loaded transcript for {} ({} segments)",
            transcript.video_id,
            transcript.segments.len()
        );
        Ok(self.transcript.insert(transcript))
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    pub fn has_transcript(&self) -> bool {
        self.transcript.is_some()
    }

    /// Entries in creation order.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn model(&self) -> &str {
        self.completer.model()
    }

    /// Summarize the loaded transcript and record it in the history.
    pub async fn summarize(&mut self) -> Result<String> {
        let transcript = self.transcript.as_ref().ok_or(TubechatError::NoTranscript)?;

        let summary = self
            .aggregator()
            .summarize(&transcript.text, self.chunking.summary_max_cost)
            .await?;

        self.history.push(HistoryEntry::Summary {
            content: summary.clone(),
            created_at: Utc::now(),
        });
        Ok(summary)
    }

    /// Answer a question about the loaded transcript and record it in the history.
    pub async fn answer(&mut self, question: &str) -> Result<String> {
        let transcript = self.transcript.as_ref().ok_or(TubechatError::NoTranscript)?;

        let answer = self
            .aggregator()
            .answer(&transcript.text, question, self.chunking.answer_max_cost)
            .await?;

        self.history.push(HistoryEntry::Chat {
            question: question.to_string(),
            answer: answer.clone(),
            created_at: Utc::now(),
        });
        Ok(answer)
    }

    fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(self.completer.as_ref(), &self.prompts).with_progress(self.show_progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::NO_RELEVANT_INFO;
    use crate::completion::scripted::ScriptedCompleter;
    use crate::transcript::TranscriptSegment;
    use async_trait::async_trait;

    struct FakeSource {
        segments: Vec<TranscriptSegment>,
    }

    #[async_trait]
    impl TranscriptSource for FakeSource {
        async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
            if video_id == "nocaptions1" {
                return Err(TubechatError::TranscriptUnavailable("no captions".to_string()));
            }
            Ok(self.segments.clone())
        }
    }

    fn session_with(replies: Vec<Result<String>>, chunking: ChunkingSettings) -> Session {
        let source = FakeSource {
            segments: vec![
                TranscriptSegment::new(0.0, "Welcome to the show"),
                TranscriptSegment::new(4.2, "Paris is the capital of France"),
            ],
        };
        Session::new(
            Box::new(source),
            Box::new(ScriptedCompleter::with_results(replies)),
            Prompts::default(),
            chunking,
        )
    }

    fn replies(items: &[&str]) -> Vec<Result<String>> {
        items.iter().map(|s| Ok(s.to_string())).collect()
    }

    #[tokio::test]
    async fn test_load_formats_transcript() {
        let mut session = session_with(Vec::new(), ChunkingSettings::default());

        let transcript = session
            .load("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(transcript.video_id, "dQw4w9WgXcQ");
        assert_eq!(
            transcript.text,
            "[00:00:00] Welcome to the show\n[00:00:04] Paris is the capital of France"
        );
        assert!(session.has_transcript());
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_link() {
        let mut session = session_with(Vec::new(), ChunkingSettings::default());
        let err = session.load("https://example.com/video").await.unwrap_err();
        assert!(matches!(err, TubechatError::InvalidInput(_)));
        assert!(!session.has_transcript());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_transcript() {
        let mut session = session_with(Vec::new(), ChunkingSettings::default());
        session.load("dQw4w9WgXcQ").await.unwrap();

        let err = session.load("nocaptions1").await.unwrap_err();
        assert!(matches!(err, TubechatError::TranscriptUnavailable(_)));
        assert_eq!(session.transcript().unwrap().video_id, "dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn test_operations_require_transcript() {
        let mut session = session_with(replies(&["unused"]), ChunkingSettings::default());

        assert!(matches!(session.summarize().await, Err(TubechatError::NoTranscript)));
        assert!(matches!(session.answer("Q?").await, Err(TubechatError::NoTranscript)));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_records_interactions_in_order() {
        let mut session = session_with(
            replies(&["## Summary", "Paris.", NO_RELEVANT_INFO]),
            ChunkingSettings::default(),
        );
        session.load("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(session.summarize().await.unwrap(), "## Summary");
        assert_eq!(session.answer("Capital?").await.unwrap(), "Paris.");
        let fallback = session.answer("Weather?").await.unwrap();
        assert_eq!(fallback, Prompts::default().answer.not_found);

        let history = session.history();
        assert_eq!(history.len(), 3);
        assert!(matches!(&history[0], HistoryEntry::Summary { content, .. } if content == "## Summary"));
        assert!(matches!(
            &history[1],
            HistoryEntry::Chat { question, answer, .. } if question == "Capital?" && answer == "Paris."
        ));
        assert!(matches!(&history[2], HistoryEntry::Chat { question, .. } if question == "Weather?"));
        assert!(history[0].created_at() <= history[1].created_at());
        assert!(history[1].created_at() <= history[2].created_at());
    }

    #[tokio::test]
    async fn test_failed_interaction_is_not_recorded() {
        let mut session = session_with(
            vec![Err(TubechatError::Completion("boom".to_string()))],
            ChunkingSettings::default(),
        );
        session.load("dQw4w9WgXcQ").await.unwrap();

        let err = session.summarize().await.unwrap_err();
        assert!(matches!(err, TubechatError::SummaryGeneration(_)));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_session_uses_configured_ceilings() {
        // A ceiling of 8 splits the two caption lines into three chunks.
        let chunking = ChunkingSettings {
            summary_max_cost: 4000,
            answer_max_cost: 8,
        };
        let mut session = session_with(
            replies(&[NO_RELEVANT_INFO, "Paris", NO_RELEVANT_INFO]),
            chunking,
        );
        session.load("dQw4w9WgXcQ").await.unwrap();

        let answer = session.answer("Capital?").await.unwrap();
        assert_eq!(answer, "Paris");
    }

    #[test]
    fn test_history_entry_serialization() {
        let entry = HistoryEntry::Chat {
            question: "Q".to_string(),
            answer: "A".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "chat");
        assert_eq!(json["question"], "Q");
    }
}
