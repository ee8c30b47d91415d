use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::commands::helpers::shell_escape;

#[derive(Error, Debug)]
pub enum FontliftError {
    #[error("{0}")]
    Validation(String),

    #[error("Font file not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Font '{0}' not found in installed fonts")]
    FontNotFound(String),

    #[error("{}", ambiguous_message(.name, .candidates, .command))]
    AmbiguousName {
        name: String,
        candidates: Vec<PathBuf>,
        command: String,
    },

    #[error(
        "Refusing to modify protected system font: {}\nFonts in /System/Library/Fonts/ and /Library/Fonts/ are managed by the operating system.",
        .0.display()
    )]
    ProtectedPath(PathBuf),

    #[error(
        "Refusing to install {}: it shares the name '{name}' with protected system font {}\nInstalling it would shadow the system font.",
        .path.display(),
        .conflict.display()
    )]
    ProtectedConflict {
        path: PathBuf,
        conflict: PathBuf,
        name: String,
    },

    #[error("{}", unregister_message(.path, .note.as_deref(), .failures, .hint.as_deref()))]
    UnregisterFailed {
        path: PathBuf,
        /// Earlier warning about the same font, e.g. its file being gone.
        note: Option<String>,
        failures: Vec<String>,
        hint: Option<String>,
    },

    #[error("Error installing font {}: {message}{}", .path.display(), hint_suffix(.hint.as_deref()))]
    RegisterFailed {
        path: PathBuf,
        message: String,
        hint: Option<String>,
    },

    /// Native error text from the font service, surfaced verbatim.
    #[error("{0}")]
    Service(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FontliftError>;

impl FontliftError {
    /// Attach `note` to an unregistration failure. Other errors pass through.
    pub fn with_note(self, note: Option<String>) -> Self {
        match self {
            FontliftError::UnregisterFailed {
                path,
                failures,
                hint,
                ..
            } => FontliftError::UnregisterFailed {
                path,
                note,
                failures,
                hint,
            },
            other => other,
        }
    }
}

fn ambiguous_message(name: &str, candidates: &[PathBuf], command: &str) -> String {
    let mut msg = format!(
        "Font name '{}' is ambiguous: it matches {} installed files.\nRun one of the following to pick a file explicitly:",
        name,
        candidates.len()
    );
    for path in candidates {
        msg.push_str(&format!(
            "\n  fontlift {} {}",
            command,
            shell_escape(&path.to_string_lossy())
        ));
    }
    msg
}

fn unregister_message(
    path: &Path,
    note: Option<&str>,
    failures: &[String],
    hint: Option<&str>,
) -> String {
    let mut msg = format!("Error uninstalling font {}:", path.display());
    if let Some(note) = note {
        msg.push_str(&format!("\nNote: {}", note));
    }
    for failure in failures {
        msg.push_str(&format!("\n  {}", failure));
    }
    msg.push_str(&hint_suffix(hint));
    msg
}

fn hint_suffix(hint: Option<&str>) -> String {
    match hint {
        Some(hint) => format!("\nHint: {}", hint),
        None => String::new(),
    }
}
