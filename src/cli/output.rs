//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Write as _;

use chrono::NaiveDate;
use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::application::ApplicationError;
use crate::domain::StandupState;

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

/// Format the heading date; an invalid chrono format is a config error.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String, ApplicationError> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| ApplicationError::Config {
        message: format!("invalid date_format: {format:?}"),
    })?;
    Ok(out)
}

/// Checklist tree: present participants in speaking order, then absentees.
///
/// ```text
/// Present (2)
/// ├── [x] Alice: blocked on review
/// └── [ ] Bob
/// Absent (1)
/// └── Carol
/// ```
pub fn render_checklist(state: &StandupState) -> String {
    let present = Tree::new(format!("Present ({})", state.roster.len())).with_leaves(
        state.roster.iter().map(|name| {
            let tick = if state.is_checked(name) { "[x]" } else { "[ ]" };
            with_note(format!("{tick} {name}"), state.note(name))
        }),
    );

    let mut out = present.to_string();
    if !state.absentees.is_empty() {
        let absent = Tree::new(format!("Absent ({})", state.absentees.len())).with_leaves(
            state
                .absentees
                .iter()
                .map(|name| with_note(name.clone(), state.note(name))),
        );
        out.push_str(&absent.to_string());
    }
    out
}

fn with_note(label: String, note: Option<&str>) -> String {
    match note {
        Some(note) => format!("{label}: {note}"),
        None => label,
    }
}

/// One-line speaking order, e.g. `Bob → Alice → Carol`.
pub fn speaking_order(state: &StandupState) -> String {
    state.roster.iter().join(" → ")
}
