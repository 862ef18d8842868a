//! tubechat - summarize and chat with video transcripts
//!
//! Paste a YouTube link, fetch its captions, and let a language model
//! summarize the video or answer questions about it.
//!
//! # Overview
//!
//! Transcripts are usually far longer than a single model request allows, so
//! they go through a map-reduce pipeline:
//!
//! 1. the transcript is split into word-aligned chunks under an approximate
//!    token ceiling,
//! 2. every chunk is sent to the model in order,
//! 3. when more than one partial result comes back, one final request merges
//!    them.
//!
//! # Architecture
//!
//! - `chunking` - Token-budgeted transcript splitting
//! - `aggregate` - Map-reduce summarization and question answering
//! - `session` - Loaded transcript and interaction history for one run
//! - `transcript` - Transcript model, caption retrieval and export formats
//! - `completion` - Chat completion backends
//! - `video` - YouTube link parsing
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use tubechat::config::Settings;
//! use tubechat::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let mut session = Session::from_settings(&settings)?;
//!
//!     session.load("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     println!("{}", session.summarize().await?);
//!     println!("{}", session.answer("What is the main message?").await?);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod chunking;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod openai;
pub mod session;
pub mod transcript;
pub mod video;

pub use error::{Result, TubechatError};
