// Rust guideline compliant 2026-10-18

//! Output formatting module for the Roster CLI.
//!
//! This module provides functionality for formatting users and repository
//! totals in various output formats (JSON, table, plain text).

use roster_app::{RosterStats, SuccessEnvelope, UserSummary};
use roster_core::OutputFormat;
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Output formatter trait.
///
/// Defines the interface for formatting Roster data in different output formats.
pub trait OutputFormatter {
    /// Formats a single resolved user.
    fn format_user(&self, user: &UserSummary) -> String;

    /// Formats a list of users.
    fn format_users(&self, users: &[UserSummary]) -> String;

    /// Formats repository totals.
    fn format_stats(&self, stats: &RosterStats) -> String;

    /// Formats the confirmation of a completed change.
    fn format_success(&self, message: &str) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;
}

fn online_label(user: &UserSummary) -> &'static str {
    if user.online {
        "online"
    } else {
        "offline"
    }
}

fn paint(prefix: &str, color: Color, rest: &str) -> String {
    let mut buffer = Buffer::ansi();
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(buffer, "{}", prefix);
    let _ = buffer.reset();
    let _ = write!(buffer, " {}", rest);
    String::from_utf8_lossy(buffer.as_slice()).into_owned()
}

/// JSON output formatter.
///
/// Wraps every payload in a success envelope for machine consumption.
pub struct JsonFormatter;

impl JsonFormatter {
    fn envelope<T: Serialize>(result: T) -> String {
        serde_json::to_string_pretty(&SuccessEnvelope::new(result))
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize output" }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_user(&self, user: &UserSummary) -> String {
        Self::envelope(user)
    }

    fn format_users(&self, users: &[UserSummary]) -> String {
        Self::envelope(json!({
            "users": users,
            "total": users.len(),
        }))
    }

    fn format_stats(&self, stats: &RosterStats) -> String {
        Self::envelope(stats)
    }

    fn format_success(&self, message: &str) -> String {
        Self::envelope(json!({ "message": message }))
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

/// Table output formatter.
///
/// Formats users as human-readable tables.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_user(&self, user: &UserSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!("Username:    {}\n", user.username));
        if let Some(nickname) = &user.nickname {
            output.push_str(&format!("Nickname:    {}\n", nickname));
        }
        output.push_str(&format!("Status:      {}", online_label(user)));
        output
    }

    fn format_users(&self, users: &[UserSummary]) -> String {
        if users.is_empty() {
            return "No users found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["Username", "Display Name", "Status"]);
        for user in users {
            builder.push_record(vec![
                user.username.as_str(),
                user.display_name.as_str(),
                online_label(user),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_stats(&self, stats: &RosterStats) -> String {
        format!(
            "Known users: {}\nOnline:      {}",
            stats.known_users, stats.online_users
        )
    }

    fn format_success(&self, message: &str) -> String {
        if self.use_color {
            paint("✓", Color::Green, message)
        } else {
            format!("✓ {}", message)
        }
    }

    fn format_error(&self, error: &str) -> String {
        if self.use_color {
            paint("Error:", Color::Red, error)
        } else {
            format!("Error: {}", error)
        }
    }
}

/// Plain text output formatter.
///
/// One record per line, fields separated by tabs.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_user(&self, user: &UserSummary) -> String {
        format!(
            "{}\t{}\t{}",
            user.username,
            user.display_name,
            online_label(user)
        )
    }

    fn format_users(&self, users: &[UserSummary]) -> String {
        users
            .iter()
            .map(|user| self.format_user(user))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_stats(&self, stats: &RosterStats) -> String {
        format!("{}\t{}", stats.known_users, stats.online_users)
    }

    fn format_success(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `use_color` - Whether to use colored output (ignored for JSON and plain)
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
        OutputFormat::Plain => Box::new(PlainFormatter),
    }
}
