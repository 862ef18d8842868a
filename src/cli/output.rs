//! CLI output formatting utilities.

use crate::session::HistoryEntry;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a menu option.
    pub fn menu_item(key: &str, label: &str) {
        println!("  {} {}", style(format!("[{}]", key)).cyan().bold(), style(label).yellow());
    }

    /// Print a titled block of text, rendering Markdown headings, bullets
    /// and bold spans from model replies.
    pub fn panel(title: &str, body: &str) {
        let (top, bottom) = panel_borders(title);
        println!("\n{}", style(top).cyan().bold());
        for line in body.trim_end().lines() {
            println!("{} {}", style("│").cyan(), render_markdown_line(line));
        }
        println!("{}", style(bottom).cyan());
    }

    /// Print one history entry, numbered from 1.
    pub fn history_entry(index: usize, entry: &HistoryEntry) {
        let time = entry.created_at().format("%H:%M:%S").to_string();
        match entry {
            HistoryEntry::Summary { content, .. } => {
                Self::panel(&format!("Summary #{} ({})", index, time), content);
            }
            HistoryEntry::Chat { question, answer, .. } => {
                Self::panel(
                    &format!("Chat #{} ({})", index, time),
                    &format!("Q: {}\n\nA: {}", question, answer),
                );
            }
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

const PANEL_MIN_WIDTH: usize = 48;

/// Top and bottom panel borders, both `width` characters wide.
fn panel_borders(title: &str) -> (String, String) {
    let width = (title.chars().count() + 6).max(PANEL_MIN_WIDTH);
    let label = format!("┌─ {} ", title);
    let fill = width - label.chars().count() - 1;
    let top = format!("{}{}┐", label, "─".repeat(fill));
    let bottom = format!("└{}┘", "─".repeat(width - 2));
    (top, bottom)
}

/// Split a Markdown heading into its level and text.
fn heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.strip_prefix(' ').map(|text| (level, text.trim()))
}

/// Render `**bold**` spans; an unmatched `**` is kept literally.
fn render_inline(line: &str) -> String {
    let mut out = String::new();
    let mut rest = line;
    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        match after.find("**") {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str(&style(&after[..end]).bold().to_string());
                rest = &after[end + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn render_markdown_line(line: &str) -> String {
    if let Some((level, text)) = heading(line) {
        let text = text.replace("**", "");
        return if level == 1 {
            style(text).bold().underlined().to_string()
        } else {
            style(text).bold().yellow().to_string()
        };
    }

    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim_start();
    if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        return format!("{}• {}", &line[..indent], render_inline(item));
    }

    render_inline(line)
}

/// Format duration in seconds to a human-readable string.
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
