//! Transcript output formatting (text, JSON, SRT, VTT).

use super::Transcript;
use crate::error::Result;
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
    Srt,
    Vtt,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "srt" => Ok(OutputFormat::Srt),
            "vtt" | "webvtt" => Ok(OutputFormat::Vtt),
            _ => Err(format!("Unknown format: {}. Use txt, json, srt, or vtt.", s)),
        }
    }
}

/// JSON-serializable transcript for export.
#[derive(Debug, Serialize)]
pub struct TranscriptExport {
    pub video_id: String,
    pub duration_seconds: f64,
    pub segments: Vec<SegmentExport>,
}

#[derive(Debug, Serialize)]
pub struct SegmentExport {
    pub text: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

impl From<&Transcript> for TranscriptExport {
    fn from(transcript: &Transcript) -> Self {
        Self {
            video_id: transcript.video_id.clone(),
            duration_seconds: transcript.duration_seconds(),
            segments: transcript
                .segments
                .iter()
                .enumerate()
                .map(|(i, s)| SegmentExport {
                    text: s.text.clone(),
                    start_seconds: s.start_seconds,
                    end_seconds: transcript.segment_end(i),
                })
                .collect(),
        }
    }
}

/// Format a transcript for output.
pub fn format_transcript(transcript: &Transcript, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Text => transcript.text.clone(),
        OutputFormat::Json => format_json(transcript)?,
        OutputFormat::Srt => format_cues(transcript, "", ','),
        OutputFormat::Vtt => format_cues(transcript, "WEBVTT\n\n", '.'),
    };
    Ok(output)
}

fn format_json(transcript: &Transcript) -> Result<String> {
    let export = TranscriptExport::from(transcript);
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Numbered cue blocks shared by SRT and WebVTT; they differ only in header
/// and millisecond separator.
fn format_cues(transcript: &Transcript, header: &str, ms_separator: char) -> String {
    let mut output = String::from(header);

    for (i, segment) in transcript.segments.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            cue_timestamp(segment.start_seconds, ms_separator),
            cue_timestamp(transcript.segment_end(i), ms_separator)
        ));
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }

    output
}

/// Format a cue timestamp (00:00:00,000 or 00:00:00.000).
fn cue_timestamp(seconds: f64, ms_separator: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, secs, ms_separator, ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptSegment;

    fn sample_transcript() -> Transcript {
        Transcript::new(
            "test123",
            vec![
                TranscriptSegment::new(0.0, "Hello world.").with_duration(2.5),
                TranscriptSegment::new(2.5, "This is a test.").with_duration(2.5),
            ],
        )
    }

    #[test]
    fn test_format_text() {
        let text = format_transcript(&sample_transcript(), OutputFormat::Text).unwrap();
        assert_eq!(text, "[00:00:00] Hello world.\n[00:00:02] This is a test.");
    }

    #[test]
    fn test_format_json() {
        let json = format_transcript(&sample_transcript(), OutputFormat::Json).unwrap();
        assert!(json.contains("\"video_id\": \"test123\""));
        assert!(json.contains("\"end_seconds\": 5.0"));
    }

    #[test]
    fn test_format_json_writes_non_finite_times_as_null() {
        let transcript = Transcript::new(
            "test123",
            vec![TranscriptSegment::new(f64::NAN, "Broken timing.").with_duration(1.0)],
        );
        let json = format_transcript(&transcript, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["video_id"], "test123");
        assert!(value["segments"][0]["start_seconds"].is_null());
    }

    #[test]
    fn test_format_srt() {
        let srt = format_transcript(&sample_transcript(), OutputFormat::Srt).unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,500\nHello world."));
        assert!(srt.contains("2\n00:00:02,500 --> 00:00:05,000"));
    }

    #[test]
    fn test_format_vtt() {
        let vtt = format_transcript(&sample_transcript(), OutputFormat::Vtt).unwrap();
        assert!(vtt.starts_with("WEBVTT\n\n"));
        assert!(vtt.contains("00:00:00.000 --> 00:00:02.500"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("SRT".parse::<OutputFormat>().unwrap(), OutputFormat::Srt);
        assert_eq!("webvtt".parse::<OutputFormat>().unwrap(), OutputFormat::Vtt);
        assert!("docx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cue_timestamp() {
        assert_eq!(cue_timestamp(0.0, ','), "00:00:00,000");
        assert_eq!(cue_timestamp(61.5, ','), "00:01:01,500");
        assert_eq!(cue_timestamp(3661.123, '.'), "01:01:01.123");
    }
}
