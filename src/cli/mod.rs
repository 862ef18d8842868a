//! CLI module for tubechat.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// tubechat - summarize and chat with video transcripts
///
/// Paste a YouTube link, fetch its captions, and ask a language model to
/// summarize the video or answer questions about it.
#[derive(Parser, Debug)]
#[command(name = "tubechat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the model from the configuration
    #[arg(short, long, global = true, env = "TUBECHAT_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (default)
    Interactive {
        /// Video to load before showing the menu
        url: Option<String>,
    },

    /// Summarize a video
    Summarize {
        /// YouTube URL or video ID
        url: String,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL or video ID
        url: String,

        /// The question to ask
        question: String,
    },

    /// Fetch and print or save a video's transcript
    Transcript {
        /// YouTube URL or video ID
        url: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (txt, json, srt, vtt)
        #[arg(long, default_value = "txt")]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
