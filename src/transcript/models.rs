//! Data models for video transcripts.

use serde::{Deserialize, Serialize};

/// Fallback display length for a final segment with no recorded duration.
const DEFAULT_LAST_SEGMENT_SECONDS: f64 = 5.0;

/// A single caption line with its start offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Offset from the start of the video, in seconds.
    pub start_seconds: f64,
    /// How long the caption is shown, if the source reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Caption text.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a segment without duration information.
    pub fn new(start_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            duration_seconds: None,
            text: text.into(),
        }
    }

    /// Set the caption duration.
    pub fn with_duration(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }
}

/// A fetched transcript for one video.
///
/// Immutable once built; `text` is the prompt form where every line is
/// prefixed with an `[HH:MM:SS]` timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Caption segments in playback order.
    pub segments: Vec<TranscriptSegment>,
    /// Newline-joined, timestamp-prefixed text.
    pub text: String,
}

impl Transcript {
    /// Build a transcript from ordered segments.
    pub fn new(video_id: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        let text = segments
            .iter()
            .map(|s| format!("[{}] {}", format_timestamp(s.start_seconds), s.text))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            video_id: video_id.into(),
            segments,
            text,
        }
    }

    /// Whether the transcript holds any text at all.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// End time of the segment at `index`.
    ///
    /// Uses the recorded duration, clipped to the next segment's start, and
    /// falls back to the next segment's start when no duration is known.
    pub fn segment_end(&self, index: usize) -> f64 {
        let segment = &self.segments[index];
        let next_start = self.segments.get(index + 1).map(|s| s.start_seconds);

        match (segment.duration_seconds, next_start) {
            (Some(d), Some(next)) => (segment.start_seconds + d).min(next),
            (Some(d), None) => segment.start_seconds + d,
            (None, Some(next)) => next,
            (None, None) => segment.start_seconds + DEFAULT_LAST_SEGMENT_SECONDS,
        }
    }

    /// Total duration in seconds, as far as the captions reach.
    pub fn duration_seconds(&self) -> f64 {
        if self.segments.is_empty() {
            0.0
        } else {
            self.segment_end(self.segments.len() - 1)
        }
    }

    /// Number of whitespace-separated words in the caption text.
    pub fn word_count(&self) -> usize {
        self.segments
            .iter()
            .map(|s| s.text.split_whitespace().count())
            .sum()
    }
}

/// Format seconds as HH:MM:SS. Hours are not wrapped at 24.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
