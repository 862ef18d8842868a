//! Video link parsing.
//!
//! Turns a pasted YouTube link (or a bare video ID) into the 11-character
//! video ID used to fetch captions.

use crate::error::{Result, TubechatError};
use regex::Regex;
use url::Url;

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

/// Path prefixes that are followed directly by a video ID.
const ID_PATH_PREFIXES: &[&str] = &["embed", "shorts", "v", "live"];

/// Extracts video IDs from YouTube URLs.
pub struct VideoLinkParser {
    id_regex: Regex,
}

impl VideoLinkParser {
    pub fn new() -> Self {
        let id_regex = Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid regex");
        Self { id_regex }
    }

    /// Extract the video ID from a URL or bare ID.
    pub fn extract_id(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if self.id_regex.is_match(input) {
            return Some(input.to_string());
        }

        let url = if input.contains("://") {
            Url::parse(input).ok()?
        } else {
            Url::parse(&format!("https://{}", input)).ok()?
        };

        let host = url.host_str()?.to_lowercase();
        let candidate = if host == "youtu.be" {
            url.path_segments()?.next().map(str::to_string)
        } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
            if url.path() == "/watch" {
                url.query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else {
                let mut segments = url.path_segments()?;
                match segments.next() {
                    Some(prefix) if ID_PATH_PREFIXES.contains(&prefix) => {
                        segments.next().map(str::to_string)
                    }
                    _ => None,
                }
            }
        } else {
            None
        };

        candidate.filter(|id| self.id_regex.is_match(id))
    }

    /// Like `extract_id`, but reports invalid input as an error.
    pub fn parse(&self, input: &str) -> Result<String> {
        self.extract_id(input).ok_or_else(|| {
            TubechatError::InvalidInput(format!("Not a valid YouTube URL or video ID: {}", input))
        })
    }
}

impl Default for VideoLinkParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let parser = VideoLinkParser::new();
        let id = Some("dQw4w9WgXcQ".to_string());

        assert_eq!(parser.extract_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(parser.extract_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42s"), id);
        assert_eq!(parser.extract_id("https://youtu.be/dQw4w9WgXcQ?si=abc"), id);
        assert_eq!(parser.extract_id("https://youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(parser.extract_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"), id);
        assert_eq!(parser.extract_id("youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(parser.extract_id("  dQw4w9WgXcQ \n"), id);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let parser = VideoLinkParser::new();

        assert_eq!(parser.extract_id(""), None);
        assert_eq!(parser.extract_id("not-a-video-id"), None);
        assert_eq!(parser.extract_id("https://vimeo.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(parser.extract_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(parser.extract_id("https://www.youtube.com/@channel"), None);
        assert_eq!(parser.extract_id("https://example.com/"), None);
    }

    #[test]
    fn test_parse_error() {
        let parser = VideoLinkParser::new();
        let err = parser.parse("nope").unwrap_err();
        assert!(matches!(err, TubechatError::InvalidInput(_)));
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("dQw4w9WgXcQ"), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
