//! CLI command implementations.

mod ask;
mod config;
mod interactive;
mod summarize;
mod transcript;

pub use ask::run_ask;
pub use config::run_config;
pub use interactive::run_interactive;
pub use summarize::run_summarize;
pub use transcript::run_transcript;
