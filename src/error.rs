//! Error types for tubechat.

use thiserror::Error;

/// Library-level error type for tubechat operations.
#[derive(Error, Debug)]
pub enum TubechatError {
    #[error("No transcript available. Load a video first.")]
    NoTranscript,

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Completion failed: {0}")]
    Completion(String),

    #[error("Error generating summary: {0}")]
    SummaryGeneration(#[source] Box<TubechatError>),

    #[error("Error generating response: {0}")]
    AnswerGeneration(#[source] Box<TubechatError>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TubechatError {
    /// Wrap an error raised while building a summary.
    pub fn summary(err: TubechatError) -> Self {
        TubechatError::SummaryGeneration(Box::new(err))
    }

    /// Wrap an error raised while answering a question.
    pub fn answer(err: TubechatError) -> Self {
        TubechatError::AnswerGeneration(Box::new(err))
    }
}

/// Result type alias for tubechat operations.
pub type Result<T> = std::result::Result<T, TubechatError>;
