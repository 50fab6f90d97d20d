//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::{ColoredString, Colorize};

use crate::domain::{ClassificationResult, Presentation, Tone};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

fn toned(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Plain => text.normal(),
        Tone::Busy => text.cyan(),
        Tone::Good => text.green().bold(),
        Tone::Bad => text.red().bold(),
        Tone::Muted => text.yellow(),
        Tone::Failed => text.red(),
    }
}

/// Format the status line: icon, status word, and the score when known.
pub fn status_line(view: Presentation, result: Option<&ClassificationResult>) -> String {
    let status = toned(view.status, view.tone);
    match result {
        Some(r) => format!("{} {} ({} {:.1}%)", view.icon, status, r.label, r.score * 100.0),
        None => format!("{} {}", view.icon, status),
    }
}

/// Print a transient state line to stderr, keeping stdout for data.
pub fn state(view: Presentation) {
    eprintln!("{}", status_line(view, None));
}

/// Render a review with its current state.
pub fn review(text: &str, view: Presentation, result: Option<&ClassificationResult>) {
    println!("{}", status_line(view, result));
    for line in text.lines() {
        println!("  {}", line);
    }
}
