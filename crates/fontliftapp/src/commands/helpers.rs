use crate::context::RunContext;
use crate::error::{FontliftError, Result};
use crate::model::{FontRecord, Scope};
use crate::registry::FontBackend;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directories owned by the operating system. Never configurable.
pub const PROTECTED_FONT_DIRS: [&str; 2] = ["/System/Library/Fonts/", "/Library/Fonts/"];

pub const FONT_EXTENSIONS: [&str; 5] = ["ttf", "otf", "ttc", "otc", "dfont"];

/// Plain string-prefix check; the path is not normalized first.
pub fn is_protected_path(path: &Path) -> bool {
    let path = path.to_string_lossy();
    PROTECTED_FONT_DIRS
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Gate every unregister or delete.
pub fn ensure_mutable(path: &Path) -> Result<()> {
    if is_protected_path(path) {
        log::info!("refusing to modify protected font {}", path.display());
        return Err(FontliftError::ProtectedPath(path.to_path_buf()));
    }
    Ok(())
}

/// Quote `s` as a single POSIX shell word.
pub fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

pub fn is_valid_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Registered paths without duplicates, sorted.
pub fn distinct_paths(records: &[FontRecord]) -> Vec<PathBuf> {
    records
        .iter()
        .map(|r| r.path.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Resolve `name` against the enumerated fonts.
///
/// Matching is exact and case-sensitive on each record's resolved name.
/// `command` is the subcommand named in the disambiguation hints.
pub fn resolve_name(records: &[FontRecord], name: &str, command: &str) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = records
        .iter()
        .filter(|r| r.resolved_name() == Some(name))
        .map(|r| r.path.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    match candidates.len() {
        0 => Err(FontliftError::FontNotFound(name.to_string())),
        1 => Ok(candidates.remove(0)),
        _ => Err(FontliftError::AmbiguousName {
            name: name.to_string(),
            candidates,
            command: command.to_string(),
        }),
    }
}

/// Best name we have for `path`: the file's own metadata first, then
/// whatever the font service reported, then "font".
pub fn font_label<B: FontBackend + ?Sized>(
    backend: &B,
    path: &Path,
    records: &[FontRecord],
) -> String {
    if let Some(name) = backend
        .describe(path)
        .as_ref()
        .and_then(|r| r.resolved_name())
    {
        return name.to_string();
    }
    records
        .iter()
        .filter(|r| r.path == path)
        .find_map(|r| r.resolved_name())
        .unwrap_or("font")
        .to_string()
}

/// Per-scope results of one unregistration attempt.
#[derive(Debug, Default)]
pub struct UnregisterOutcome {
    pub succeeded: Vec<Scope>,
    pub failures: Vec<(Scope, String)>,
}

impl UnregisterOutcome {
    pub fn is_success(&self) -> bool {
        !self.succeeded.is_empty()
    }

    /// The succeeded scopes, or [`FontliftError::UnregisterFailed`] carrying
    /// every scope's message.
    pub fn into_result(self, path: &Path, ctx: &RunContext) -> Result<Vec<Scope>> {
        if self.is_success() {
            return Ok(self.succeeded);
        }
        Err(FontliftError::UnregisterFailed {
            path: path.to_path_buf(),
            note: None,
            failures: self
                .failures
                .into_iter()
                .map(|(scope, msg)| format!("{} scope: {}", scope, msg))
                .collect(),
            hint: elevation_hint(ctx),
        })
    }
}

/// Try each scope in order, independently.
pub fn unregister_in_scopes<B: FontBackend + ?Sized>(
    backend: &B,
    path: &Path,
    scopes: &[Scope],
) -> UnregisterOutcome {
    let mut outcome = UnregisterOutcome::default();
    for &scope in scopes {
        match backend.unregister(path, scope) {
            Ok(()) => {
                log::debug!("unregistered {} from {} scope", path.display(), scope);
                outcome.succeeded.push(scope);
            }
            Err(e) => {
                log::debug!(
                    "unregister {} from {} scope failed: {}",
                    path.display(),
                    scope,
                    e
                );
                outcome.failures.push((scope, e.to_string()));
            }
        }
    }
    outcome
}

pub fn unregister_all_scopes<B: FontBackend + ?Sized>(
    backend: &B,
    path: &Path,
) -> UnregisterOutcome {
    unregister_in_scopes(backend, path, &Scope::ALL)
}

/// "user", "system" or "user and system".
pub fn scopes_label(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(" and ")
}

pub fn elevation_hint(ctx: &RunContext) -> Option<String> {
    if ctx.elevated {
        None
    } else {
        Some("system-scope changes need administrator rights; retry with sudo".to_string())
    }
}

/// `--admin` is refused up front unless we are already running elevated.
pub fn ensure_admin_allowed(admin: bool, ctx: &RunContext) -> Result<()> {
    if admin && !ctx.elevated && !ctx.simulated {
        return Err(FontliftError::Validation(
            "--admin requires administrator privileges. Re-run the command with sudo.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::mem_backend::MemBackend;

    fn font(path: &str, name: &str) -> FontRecord {
        FontRecord::new(path).with_postscript_name(name)
    }

    #[test]
    fn protected_prefixes() {
        assert!(is_protected_path(Path::new("/System/Library/Fonts/Helvetica.ttc")));
        assert!(is_protected_path(Path::new("/Library/Fonts/Arial.ttf")));
        assert!(!is_protected_path(Path::new(
            "/Users/x/Library/Fonts/Arial.ttf"
        )));
        assert!(!is_protected_path(Path::new("/Library/FontsExtra/A.ttf")));
        assert!(!is_protected_path(Path::new("/Library/Fonts")));
    }

    #[test]
    fn ensure_mutable_refuses_system_dirs() {
        let err = ensure_mutable(Path::new("/Library/Fonts/Arial.ttf")).unwrap_err();
        assert!(matches!(err, FontliftError::ProtectedPath(_)));
        assert!(ensure_mutable(Path::new("/tmp/Arial.ttf")).is_ok());
    }

    #[test]
    fn shell_escape_quotes() {
        assert_eq!(shell_escape(""), "''");
        assert_eq!(shell_escape("/a b/c.ttf"), "'/a b/c.ttf'");
        assert_eq!(shell_escape("it's.ttf"), "'it'\\''s.ttf'");
    }

    #[cfg(unix)]
    #[test]
    fn shell_escape_survives_the_shell() {
        let original = "/tmp/O'Brien's \"fonts\" $HOME/`x`.ttf";
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("printf %s {}", shell_escape(original)))
            .output()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), original);
    }

    #[test]
    fn font_extensions() {
        assert!(is_valid_font_extension(Path::new("a.ttf")));
        assert!(is_valid_font_extension(Path::new("a.OTF")));
        assert!(is_valid_font_extension(Path::new("a.dfont")));
        assert!(is_valid_font_extension(Path::new("a.ttc")));
        assert!(!is_valid_font_extension(Path::new("a.woff2")));
        assert!(!is_valid_font_extension(Path::new("Makefile")));
    }

    #[test]
    fn resolve_single_match() {
        let records = vec![
            font("/u/A.ttf", "A"),
            font("/u/A.ttf", "A"),
            font("/u/B.ttf", "B"),
        ];
        assert_eq!(
            resolve_name(&records, "A", "uninstall").unwrap(),
            PathBuf::from("/u/A.ttf")
        );
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let records = vec![font("/u/A.ttf", "Arial")];
        assert!(matches!(
            resolve_name(&records, "arial", "uninstall"),
            Err(FontliftError::FontNotFound(_))
        ));
    }

    #[test]
    fn resolve_uses_display_name_fallback() {
        let records = vec![FontRecord::new("/u/D.ttf").with_display_name("Display Only")];
        assert_eq!(
            resolve_name(&records, "Display Only", "remove").unwrap(),
            PathBuf::from("/u/D.ttf")
        );
    }

    #[test]
    fn resolve_ambiguous_lists_every_candidate() {
        let records = vec![
            font("/Library/Fonts/Arial.ttf", "Arial"),
            font("/Users/x/Library/Fonts/Arial.ttf", "Arial"),
        ];
        let err = resolve_name(&records, "Arial", "uninstall").unwrap_err();
        match &err {
            FontliftError::AmbiguousName { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("fontlift uninstall '/Library/Fonts/Arial.ttf'"));
        assert!(msg.contains("fontlift uninstall '/Users/x/Library/Fonts/Arial.ttf'"));
    }

    #[test]
    fn unregister_tries_user_then_system() {
        let backend = MemBackend::new().with_font(font("/u/A.ttf", "A"), Scope::System);
        let outcome = unregister_all_scopes(&backend, Path::new("/u/A.ttf"));

        assert_eq!(outcome.succeeded, vec![Scope::System]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(
            backend.unregister_calls(),
            vec![
                (PathBuf::from("/u/A.ttf"), Scope::User),
                (PathBuf::from("/u/A.ttf"), Scope::System),
            ]
        );
    }

    #[test]
    fn total_failure_carries_both_messages_and_hint() {
        let backend = MemBackend::new();
        let outcome = unregister_all_scopes(&backend, Path::new("/u/A.ttf"));
        let err = outcome
            .into_result(Path::new("/u/A.ttf"), &RunContext::default())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("user scope:"));
        assert!(msg.contains("system scope:"));
        assert!(msg.contains("sudo"));
    }

    #[test]
    fn no_hint_when_elevated() {
        let ctx = RunContext {
            elevated: true,
            ..Default::default()
        };
        let err = unregister_all_scopes(&MemBackend::new(), Path::new("/u/A.ttf"))
            .into_result(Path::new("/u/A.ttf"), &ctx)
            .unwrap_err();
        assert!(!err.to_string().contains("sudo"));
    }

    #[test]
    fn admin_needs_elevation_outside_simulation() {
        let plain = RunContext::default();
        assert!(ensure_admin_allowed(false, &plain).is_ok());
        assert!(ensure_admin_allowed(true, &plain).is_err());

        let simulated = RunContext {
            simulated: true,
            ..Default::default()
        };
        assert!(ensure_admin_allowed(true, &simulated).is_ok());
    }

    #[test]
    fn scope_labels() {
        assert_eq!(scopes_label(&[Scope::User]), "user");
        assert_eq!(scopes_label(&Scope::ALL), "user and system");
    }
}
