//! # Rendering
//!
//! `list` lines are printed verbatim. Messages are colored by level; errors go
//! to stderr with the same `Error: ` prefix `main` uses.

use colored::Colorize;
use fontliftapp::commands::{CmdMessage, CmdResult, MessageLevel};

pub(super) fn print_result(result: &CmdResult) {
    for line in &result.lines {
        println!("{}", line);
    }
    print_messages(&result.messages);
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", format_warning(&message.content).yellow()),
            MessageLevel::Error => eprintln!("{}", format_error(&message.content).red()),
        }
    }
}

fn format_warning(content: &str) -> String {
    format!("Warning: {}", content)
}

fn format_error(content: &str) -> String {
    format!("Error: {}", content)
}
