//! # Command Layer
//!
//! This module contains the **core business logic** of fontlift. Each command lives in
//! its own submodule and implements plain Rust functions over a [`FontBackend`]
//! (and, for cleanup, a [`Shell`]).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the decisions happen:
//! - Resolve a font name to exactly one file, or explain why not
//! - Refuse to touch protected system font directories
//! - Reconcile registrations against the filesystem
//! - Return structured [`CmdResult`] values with affected fonts and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout/stderr, colors or formatting
//! - **Argument parsing**: the CLI and API layers own that
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `lines`: raw output lines (the `list` command)
//! - `affected_fonts`: font files that were registered, unregistered or deleted
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! A command that processes several files independently (`install`) reports
//! per-file failures as error messages instead of returning `Err`, so the
//! remaining files still get processed. Callers check [`CmdResult::has_errors`].
//!
//! ## Testing Strategy
//!
//! Command tests run against [`crate::registry::mem_backend::MemBackend`] and
//! [`crate::shell::DryRunShell`], which record every call and can inject
//! failures per scope or per program.
//!
//! ## Command Modules
//!
//! - [`list`]: Enumerate installed fonts
//! - [`install`]: Register font files, resolving name conflicts
//! - [`uninstall`]: Unregister a font, keeping its file
//! - [`remove`]: Unregister a font and delete its file
//! - [`cleanup`]: Prune stale registrations and clear font caches
//! - [`helpers`]: Shared utilities (name resolution, protection, scopes)
//!
//! [`FontBackend`]: crate::registry::FontBackend
//! [`Shell`]: crate::shell::Shell

use serde::Serialize;
use std::path::PathBuf;

pub mod cleanup;
pub mod helpers;
pub mod install;
pub mod list;
pub mod remove;
pub mod uninstall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub lines: Vec<String>,
    pub affected_fonts: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    /// Messages of one level, for assertions and summaries.
    pub fn messages_at(&self, level: MessageLevel) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.level == level)
            .map(|m| m.content.as_str())
            .collect()
    }
}
