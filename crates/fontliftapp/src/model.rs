use crate::error::{FontliftError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Visibility domain of a font registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Visible to the current user only.
    User,
    /// Shared across all users of the login session.
    System,
}

impl Scope {
    /// Order in which scopes are attempted when a font is unregistered everywhere.
    pub const ALL: [Scope; 2] = [Scope::User, Scope::System];

    pub fn label(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::System => "system",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A registered (or registrable) font file and the names it declares.
///
/// Records are never persisted: every command rebuilds them from the font
/// service and the files themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRecord {
    pub path: PathBuf,
    pub postscript_name: Option<String>,
    pub display_name: Option<String>,
}

impl FontRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            postscript_name: None,
            display_name: None,
        }
    }

    pub fn with_postscript_name(mut self, name: impl Into<String>) -> Self {
        self.postscript_name = Some(name.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The technical identifier if the file has one, otherwise its display name.
    pub fn resolved_name(&self) -> Option<&str> {
        self.postscript_name
            .as_deref()
            .or(self.display_name.as_deref())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Human label for a font in messages, "font" when its names are unreadable.
pub fn describe_label(record: Option<&FontRecord>) -> String {
    record
        .and_then(|r| r.resolved_name())
        .unwrap_or("font")
        .to_string()
}

/// What `uninstall` and `remove` act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontTarget {
    /// A resolved name, looked up among installed fonts.
    Name(String),
    Path(PathBuf),
}

impl FontTarget {
    /// Exactly one of `name` and `path` must be given.
    pub fn from_args(name: Option<String>, path: Option<PathBuf>) -> Result<Self> {
        match (name, path) {
            (Some(name), None) => Ok(FontTarget::Name(name)),
            (None, Some(path)) => Ok(FontTarget::Path(path)),
            (None, None) => Err(FontliftError::Validation(
                "Specify either --name or a font path".to_string(),
            )),
            (Some(_), Some(_)) => Err(FontliftError::Validation(
                "Specify either --name or a font path, not both".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_name_prefers_postscript() {
        let record = FontRecord::new("/tmp/a.ttf")
            .with_postscript_name("Inter-Regular")
            .with_display_name("Inter Regular");
        assert_eq!(record.resolved_name(), Some("Inter-Regular"));
    }

    #[test]
    fn resolved_name_falls_back_to_display_name() {
        let record = FontRecord::new("/tmp/a.ttf").with_display_name("Inter Regular");
        assert_eq!(record.resolved_name(), Some("Inter Regular"));
        assert_eq!(FontRecord::new("/tmp/b.ttf").resolved_name(), None);
    }

    #[test]
    fn scope_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Scope::System).unwrap(), "\"system\"");
        assert_eq!(Scope::User.to_string(), "user");
    }

    #[test]
    fn target_needs_exactly_one_of_name_or_path() {
        assert_eq!(
            FontTarget::from_args(Some("Inter".into()), None).unwrap(),
            FontTarget::Name("Inter".into())
        );
        assert_eq!(
            FontTarget::from_args(None, Some("/u/a.ttf".into())).unwrap(),
            FontTarget::Path("/u/a.ttf".into())
        );
        assert_eq!(
            FontTarget::from_args(None, None).unwrap_err().to_string(),
            "Specify either --name or a font path"
        );
        assert_eq!(
            FontTarget::from_args(Some("Inter".into()), Some("/u/a.ttf".into()))
                .unwrap_err()
                .to_string(),
            "Specify either --name or a font path, not both"
        );
    }

    #[test]
    fn label_defaults_to_font() {
        assert_eq!(describe_label(None), "font");
        let record = FontRecord::new("/tmp/a.ttf").with_postscript_name("A");
        assert_eq!(describe_label(Some(&record)), "A");
    }
}
