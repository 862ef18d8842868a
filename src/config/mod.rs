//! Configuration module for tubechat.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts, SummaryPrompts};
pub use settings::{
    ChunkingSettings, GeneralSettings, LlmSettings, PromptSettings, Settings, TranscriptSettings,
};
