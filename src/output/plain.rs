//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::storage::QrRecord;
use chrono::{DateTime, Datelike, Local, TimeZone};
use console::style;
use std::fmt::Display;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Print a single record as a card.
pub fn print_record(record: &QrRecord) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out, "                      {}", style("Your QR Code").cyan().bold())?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {}", style("Generated for:").bold())?;
    writeln!(out, "    {}", style(&record.original_url).underlined())?;
    writeln!(out)?;
    writeln!(out, "  {} {}", style("Short ID:").bold(), style(&record.short_id).green().bold())?;
    writeln!(out, "  {}       {}", style("ID:").bold(), style(&record.id).dim())?;
    writeln!(
        out,
        "  {}  {}",
        style("Created:").bold(),
        format_date(&record.created_at.with_timezone(&Local))
    )?;
    writeln!(
        out,
        "  {}    {} bytes",
        style("Image:").bold(),
        record.qr_code_data.len()
    )?;

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print the history list, newest first.
pub fn print_history(records: &[QrRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "  {}", style("QR Code History").cyan().bold())?;
    writeln!(out, "  {}", style(THIN_RULE).dim())?;

    if records.is_empty() {
        writeln!(out, "  {}", style("No QR codes generated yet").dim())?;
        writeln!(out)?;
        return Ok(());
    }

    for record in records {
        writeln!(
            out,
            "  {}  {}",
            style(&record.short_id).green().bold(),
            truncate_string(&record.original_url, 50)
        )?;
        writeln!(out, "          {}", style(history_detail(record)).dim())?;
    }

    writeln!(out, "  {}", style(THIN_RULE).dim())?;
    writeln!(
        out,
        "  {} {}",
        style(records.len()).bold(),
        if records.len() == 1 { "code" } else { "codes" }
    )?;
    writeln!(out)?;

    Ok(())
}

/// Second line of a history entry: local date and abbreviated id.
fn history_detail(record: &QrRecord) -> String {
    format!(
        "{}  id {}",
        format_date(&record.created_at.with_timezone(&Local)),
        record.id.short()
    )
}

/// Format a date as `Monday, January 1st, 2024`.
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = date.day();
    format!(
        "{}, {} {}{}, {}",
        date.format("%A"),
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Truncate a string to a maximum length, adding ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an informational message.
pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("•").cyan(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    eprintln!("{} {}", style("✓").green().bold(), msg);
}
