//! Interactive menu loop.

use crate::cli::output::format_duration;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::session::Session;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive menu.
pub async fn run_interactive(url: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let mut session = Session::from_settings(&settings)?;

    println!("\n{}", style("🎥 tubechat").bold().blue());
    println!("{}", style(format!("Model: {}", session.model())).dim());

    if let Some(url) = url {
        load_video(&mut session, &url).await;
    }

    loop {
        print_menu(&session);

        let Some(choice) = read_line("Select an option")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(url) = read_line("Enter YouTube URL")? else {
                    break;
                };
                load_video(&mut session, &url).await;
            }
            "2" => match session.transcript() {
                Some(transcript) => Output::panel("Video Transcript", &transcript.text),
                None => Output::error("Please input a YouTube URL first!"),
            },
            "3" => {
                if !session.has_transcript() {
                    Output::error("Please input a YouTube URL first!");
                    continue;
                }
                match session.summarize().await {
                    Ok(summary) => Output::panel("Video Summary", &summary),
                    Err(e) => Output::error(&e.to_string()),
                }
            }
            "4" => {
                if !session.has_transcript() {
                    Output::error("Please input a YouTube URL first!");
                    continue;
                }
                if !chat_loop(&mut session).await? {
                    break;
                }
            }
            "5" => {
                if session.history().is_empty() {
                    Output::warning("No history available yet.");
                }
                for (i, entry) in session.history().iter().enumerate() {
                    Output::history_entry(i + 1, entry);
                }
            }
            "6" | "q" | "exit" | "quit" => break,
            "" => continue,
            other => Output::warning(&format!("Unknown option: {}", other)),
        }
    }

    Output::info("Thank you for using tubechat! 👋");
    Ok(())
}

fn print_menu(session: &Session) {
    Output::header("Menu");
    if let Some(transcript) = session.transcript() {
        Output::kv(
            "Loaded",
            &format!(
                "{} ({} segments, {} words, {})",
                transcript.video_id,
                transcript.segments.len(),
                transcript.word_count(),
                format_duration(transcript.duration_seconds())
            ),
        );
    }
    Output::menu_item("1", "📝 Input YouTube URL");
    Output::menu_item("2", "📄 Show Transcript");
    Output::menu_item("3", "📋 Summarize Video");
    Output::menu_item("4", "💬 Chat about Video");
    Output::menu_item("5", "📜 View History");
    Output::menu_item("6", "❌ Exit");
}

async fn load_video(session: &mut Session, url: &str) {
    let spinner = Output::spinner("Fetching transcript...");
    let result = session.load(url).await.map(|t| t.segments.len());
    spinner.finish_and_clear();

    match result {
        Ok(count) => Output::success(&format!("Transcript fetched successfully ({} lines)", count)),
        Err(e) => Output::error(&e.to_string()),
    }
}

/// Ask questions until the user types `exit`. Returns false on end of input.
async fn chat_loop(session: &mut Session) -> Result<bool> {
    loop {
        let Some(question) = read_line("Ask a question about the video (or 'exit' to return)")? else {
            return Ok(false);
        };

        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            return Ok(true);
        }

        match session.answer(&question).await {
            Ok(answer) => Output::panel("Answer", &answer),
            Err(e) => Output::error(&e.to_string()),
        }
    }
}

/// Prompt for a line of input. Returns None at end of input.
fn read_line(label: &str) -> io::Result<Option<String>> {
    print!("\n{} ", style(format!("{}:", label)).green().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
