use crate::commands::helpers::{
    ensure_admin_allowed, ensure_mutable, font_label, resolve_name, scopes_label,
    unregister_all_scopes,
};
use crate::commands::{CmdMessage, CmdResult};
use crate::context::RunContext;
use crate::error::Result;
use crate::model::FontTarget;
use crate::registry::FontBackend;

/// Unregister a font from every scope, leaving its file in place.
pub fn run<B: FontBackend + ?Sized>(
    backend: &B,
    ctx: &RunContext,
    target: &FontTarget,
    admin: bool,
) -> Result<CmdResult> {
    ensure_admin_allowed(admin, ctx)?;
    let mut result = CmdResult::default();

    let records = backend.enumerate()?;
    let mut missing_note = None;
    let path = match target {
        FontTarget::Name(name) => resolve_name(&records, name, "uninstall")?,
        FontTarget::Path(path) => {
            if !backend.file_exists(path) {
                // The registration may outlive its file.
                let note = format!(
                    "Font file not found at path: {}; trying to unregister it anyway",
                    path.display()
                );
                result.add_message(CmdMessage::warning(note.clone()));
                missing_note = Some(note);
            }
            path.clone()
        }
    };

    ensure_mutable(&path)?;
    let label = font_label(backend, &path, &records);

    let scopes = unregister_all_scopes(backend, &path)
        .into_result(&path, ctx)
        .map_err(|e| e.with_note(missing_note))?;
    result.add_message(CmdMessage::success(format!(
        "Uninstalled {} ({} scope): {}",
        label,
        scopes_label(&scopes),
        path.display()
    )));
    result.affected_fonts.push(path);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::FontliftError;
    use crate::model::{FontRecord, Scope};
    use crate::registry::mem_backend::MemBackend;
    use std::path::{Path, PathBuf};

    fn font(path: &str, name: &str) -> FontRecord {
        FontRecord::new(path).with_postscript_name(name)
    }

    fn by_name(name: &str) -> FontTarget {
        FontTarget::Name(name.to_string())
    }

    #[test]
    fn uninstall_by_name_keeps_file() {
        let backend = MemBackend::new().with_font(font("/u/Inter.ttf", "Inter"), Scope::User);
        let result = run(&backend, &RunContext::default(), &by_name("Inter"), false).unwrap();

        assert!(!backend.is_registered(Path::new("/u/Inter.ttf")));
        assert!(backend.file_exists(Path::new("/u/Inter.ttf")));
        assert_eq!(
            result.messages_at(MessageLevel::Success),
            vec!["Uninstalled Inter (user scope): /u/Inter.ttf"]
        );
    }

    #[test]
    fn unknown_name_is_not_found() {
        let backend = MemBackend::new();
        let err = run(&backend, &RunContext::default(), &by_name("Nope"), false).unwrap_err();
        assert_eq!(err.to_string(), "Font 'Nope' not found in installed fonts");
    }

    #[test]
    fn ambiguous_name_changes_nothing() {
        let backend = MemBackend::new()
            .with_font(font("/Library/Fonts/Arial.ttf", "Arial"), Scope::System)
            .with_font(font("/Users/x/Library/Fonts/Arial.ttf", "Arial"), Scope::User);

        let err = run(&backend, &RunContext::default(), &by_name("Arial"), false).unwrap_err();

        assert!(matches!(err, FontliftError::AmbiguousName { .. }));
        assert!(err
            .to_string()
            .contains("fontlift uninstall '/Users/x/Library/Fonts/Arial.ttf'"));
        assert!(backend.unregister_calls().is_empty());
    }

    #[test]
    fn protected_path_is_refused() {
        let backend = MemBackend::new()
            .with_font(font("/System/Library/Fonts/Menlo.ttc", "Menlo"), Scope::System);
        let target = FontTarget::Path(PathBuf::from("/System/Library/Fonts/Menlo.ttc"));

        let err = run(&backend, &RunContext::default(), &target, false).unwrap_err();

        assert!(matches!(err, FontliftError::ProtectedPath(_)));
        assert!(backend.unregister_calls().is_empty());
    }

    #[test]
    fn missing_file_warns_and_still_unregisters() {
        let backend = MemBackend::new()
            .with_stale_registration(font("/u/Gone.ttf", "Gone"), Scope::User);
        let target = FontTarget::Path(PathBuf::from("/u/Gone.ttf"));

        let result = run(&backend, &RunContext::default(), &target, false).unwrap();

        assert_eq!(result.messages_at(MessageLevel::Warning).len(), 1);
        assert!(!backend.is_registered(Path::new("/u/Gone.ttf")));
        assert_eq!(
            result.messages_at(MessageLevel::Success),
            vec!["Uninstalled Gone (user scope): /u/Gone.ttf"]
        );
    }

    #[test]
    fn registered_in_both_scopes_reports_both() {
        let backend = MemBackend::new()
            .with_font(font("/u/Inter.ttf", "Inter"), Scope::User)
            .with_stale_registration(font("/u/Inter.ttf", "Inter"), Scope::System);

        let result = run(&backend, &RunContext::default(), &by_name("Inter"), false).unwrap();
        assert!(result.messages_at(MessageLevel::Success)[0].contains("user and system scope"));
    }

    #[test]
    fn failure_in_both_scopes_is_an_error() {
        let backend = MemBackend::new().with_font(font("/u/Inter.ttf", "Inter"), Scope::User);
        backend.fail_scope(Scope::User);

        let err = run(&backend, &RunContext::default(), &by_name("Inter"), false).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Simulated user scope failure"));
        assert!(msg.contains("not registered in the system scope"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn failed_unregister_of_missing_file_keeps_the_warning() {
        let backend = MemBackend::new();
        backend.fail_scope(Scope::User);
        backend.fail_scope(Scope::System);
        let target = FontTarget::Path(PathBuf::from("/u/Gone.ttf"));

        let err = run(&backend, &RunContext::default(), &target, false).unwrap_err();

        let msg = err.to_string();
        assert!(msg.starts_with("Error uninstalling font /u/Gone.ttf:\nNote: "));
        assert!(msg.contains(
            "Font file not found at path: /u/Gone.ttf; trying to unregister it anyway"
        ));
        assert!(msg.contains("Simulated user scope failure"));
    }
}
