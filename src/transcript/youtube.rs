//! Caption retrieval through yt-dlp.
//!
//! yt-dlp writes the video's captions (uploaded or auto-generated) as a json3
//! file into a temporary directory; the caption events are then parsed into
//! transcript segments.

use super::{TranscriptSegment, TranscriptSource};
use crate::config::TranscriptSettings;
use crate::error::{Result, TubechatError};
use crate::video::watch_url;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Transcript source backed by the yt-dlp command line tool.
pub struct YtDlpTranscriptSource {
    program: String,
    languages: Vec<String>,
}

impl YtDlpTranscriptSource {
    pub fn new() -> Self {
        Self::with_settings(&TranscriptSettings::default())
    }

    pub fn with_settings(settings: &TranscriptSettings) -> Self {
        let languages = if settings.languages.is_empty() {
            vec!["en".to_string()]
        } else {
            settings.languages.clone()
        };

        Self {
            program: settings.yt_dlp_path.clone(),
            languages,
        }
    }

    /// Run yt-dlp to write caption files for `video_id` into `dir`.
    async fn download_captions(&self, video_id: &str, dir: &Path) -> Result<()> {
        let url = watch_url(video_id);
        let template = dir.join("%(id)s.%(ext)s");

        let result = Command::new(&self.program)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-format").arg("json3")
            .arg("--sub-langs").arg(self.languages.join(","))
            .arg("--output").arg(template.to_str().unwrap_or_default())
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(&url)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TubechatError::ToolNotFound(self.program.clone()));
            }
            Err(e) => {
                return Err(TubechatError::ToolFailed(format!("yt-dlp execution failed: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Video unavailable") || stderr.contains("Private video") {
                return Err(TubechatError::TranscriptUnavailable(format!(
                    "video {} is unavailable",
                    video_id
                )));
            }
            return Err(TubechatError::ToolFailed(format!("yt-dlp failed: {}", stderr.trim())));
        }

        Ok(())
    }

    /// Pick the caption file for the most preferred available language.
    fn find_caption_file(&self, dir: &Path, video_id: &str) -> Result<Option<PathBuf>> {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json3"))
            .collect();
        candidates.sort();

        for lang in &self.languages {
            let wanted = format!("{}.{}.json3", video_id, lang);
            if let Some(path) = candidates
                .iter()
                .find(|p| p.file_name().is_some_and(|name| name == wanted.as_str()))
            {
                return Ok(Some(path.clone()));
            }
        }

        Ok(candidates.into_iter().next())
    }
}

impl Default for YtDlpTranscriptSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for YtDlpTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let temp_dir = tempfile::tempdir()?;

        info!("Fetching captions for {}", video_id);
        self.download_captions(video_id, temp_dir.path()).await?;

        let path = self
            .find_caption_file(temp_dir.path(), video_id)?
            .ok_or_else(|| {
                TubechatError::TranscriptUnavailable(format!(
                    "no transcript found for video {}",
                    video_id
                ))
            })?;

        debug!("Parsing caption file {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        let segments = parse_json3(&content)?;

        if segments.is_empty() {
            return Err(TubechatError::TranscriptUnavailable(format!(
                "captions for video {} are empty",
                video_id
            )));
        }

        info!("Fetched {} caption segments", segments.len());
        Ok(segments)
    }
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse yt-dlp json3 captions into segments, dropping events with no text.
pub fn parse_json3(content: &str) -> Result<Vec<TranscriptSegment>> {
    let captions: Json3Captions = serde_json::from_str(content)?;

    let segments = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }

            let mut segment = TranscriptSegment::new(event.t_start_ms as f64 / 1000.0, text);
            if let Some(ms) = event.d_duration_ms {
                segment = segment.with_duration(ms as f64 / 1000.0);
            }
            Some(segment)
        })
        .collect();

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json3() {
        let content = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 4000, "id": 1},
                {"tStartMs": 1200, "dDurationMs": 3000, "segs": [{"utf8": "hello"}, {"utf8": " world", "tOffsetMs": 400}]},
                {"tStartMs": 4200, "dDurationMs": 10, "aAppend": 1, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 61500, "segs": [{"utf8": "second\nline"}]}
            ]
        }"#;

        let segments = parse_json3(content).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hello world");
        assert_eq!(segments[0].start_seconds, 1.2);
        assert_eq!(segments[0].duration_seconds, Some(3.0));
        assert_eq!(segments[1].text, "second line");
        assert_eq!(segments[1].start_seconds, 61.5);
        assert_eq!(segments[1].duration_seconds, None);
    }

    #[test]
    fn test_parse_json3_rejects_garbage() {
        assert!(parse_json3("not json").is_err());
    }

    #[test]
    fn test_find_caption_file_prefers_language_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abcdefghijk.de.json3"), "{}").unwrap();
        std::fs::write(dir.path().join("abcdefghijk.en.json3"), "{}").unwrap();

        let source = YtDlpTranscriptSource::with_settings(&TranscriptSettings {
            languages: vec!["fr".to_string(), "en".to_string()],
            yt_dlp_path: "yt-dlp".to_string(),
        });

        let found = source
            .find_caption_file(dir.path(), "abcdefghijk")
            .unwrap()
            .unwrap();
        assert!(found.ends_with("abcdefghijk.en.json3"));
    }

    #[test]
    fn test_find_caption_file_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = YtDlpTranscriptSource::new();
        assert!(source.find_caption_file(dir.path(), "abcdefghijk").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let source = YtDlpTranscriptSource::with_settings(&TranscriptSettings {
            languages: vec!["en".to_string()],
            yt_dlp_path: "definitely-not-a-real-yt-dlp-binary".to_string(),
        });

        let err = source.fetch("abcdefghijk").await.unwrap_err();
        assert!(matches!(err, TubechatError::ToolNotFound(_)));
    }
}
