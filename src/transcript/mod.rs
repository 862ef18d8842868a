//! Video transcripts: the data model, retrieval and export formats.

mod format;
mod models;
mod youtube;

pub use format::{format_transcript, OutputFormat, SegmentExport, TranscriptExport};
pub use models::{format_timestamp, Transcript, TranscriptSegment};
pub use youtube::{parse_json3, YtDlpTranscriptSource};

use crate::error::Result;
use async_trait::async_trait;

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the caption segments of a video, in playback order.
    ///
    /// Fails with `TranscriptUnavailable` when the video has no captions.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}
