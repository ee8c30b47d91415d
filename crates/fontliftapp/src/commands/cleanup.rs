use crate::cache::{self, CacheOptions};
use crate::commands::helpers::{
    distinct_paths, ensure_admin_allowed, is_protected_path, unregister_in_scopes,
};
use crate::commands::{CmdMessage, CmdResult};
use crate::context::RunContext;
use crate::error::Result;
use crate::model::Scope;
use crate::registry::FontBackend;
use crate::shell::Shell;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupMode {
    #[default]
    All,
    PruneOnly,
    CacheOnly,
}

pub fn run<B: FontBackend + ?Sized, S: Shell + ?Sized>(
    backend: &B,
    shell: &S,
    ctx: &RunContext,
    mode: CleanupMode,
    admin: bool,
) -> Result<CmdResult> {
    ensure_admin_allowed(admin, ctx)?;
    let mut result = CmdResult::default();

    if mode != CleanupMode::CacheOnly {
        prune(backend, admin, &mut result)?;
    }
    if mode != CleanupMode::PruneOnly {
        clear_caches(shell, ctx, admin, &mut result);
    }

    Ok(result)
}

fn stale_paths<B: FontBackend + ?Sized>(backend: &B, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !backend.file_exists(p))
        .filter(|p| {
            let protected = is_protected_path(p);
            if protected {
                log::debug!("leaving protected registration {}", p.display());
            }
            !protected
        })
        .cloned()
        .collect()
}

/// Unregister fonts whose files are gone.
pub fn prune<B: FontBackend + ?Sized>(
    backend: &B,
    admin: bool,
    result: &mut CmdResult,
) -> Result<()> {
    let scopes: &[Scope] = if admin { &Scope::ALL } else { &[Scope::User] };

    let paths = distinct_paths(&backend.enumerate()?);
    let checked = paths.len();
    let mut pruned = 0;

    for path in stale_paths(backend, &paths) {
        let outcome = unregister_in_scopes(backend, &path, scopes);
        if outcome.is_success() {
            pruned += 1;
            result.add_message(CmdMessage::info(format!(
                "Pruned stale registration: {}",
                path.display()
            )));
            result.affected_fonts.push(path);
        } else {
            log::warn!("could not prune {}", path.display());
        }
    }

    // Whatever is still registered without a file resisted cleanup.
    let residual = stale_paths(backend, &distinct_paths(&backend.enumerate()?));
    for path in &residual {
        let advice = if admin {
            ""
        } else {
            " (it may be registered system-wide; retry with sudo and --admin)"
        };
        result.add_message(CmdMessage::warning(format!(
            "Stale registration could not be removed: {}{}",
            path.display(),
            advice
        )));
    }

    result.add_message(CmdMessage::success(format!(
        "Pruned stale registrations: checked {}, pruned {}.",
        checked, pruned
    )));
    Ok(())
}

/// Clear font server and third-party caches. Every failure is a warning.
pub fn clear_caches<S: Shell + ?Sized>(
    shell: &S,
    ctx: &RunContext,
    admin: bool,
    result: &mut CmdResult,
) {
    let mut third_party = ctx.third_party_caches;
    let home = match &ctx.home {
        Some(home) => home.clone(),
        None => {
            if third_party {
                result.add_message(CmdMessage::warning(
                    "Could not determine the home directory; skipping third-party caches",
                ));
            }
            third_party = false;
            PathBuf::new()
        }
    };

    let plan = cache::plan(
        &home,
        CacheOptions {
            admin,
            restart_font_server: ctx.restart_font_server,
            third_party,
        },
    );
    let report = cache::clear(shell, &plan);
    for failure in report.failures {
        result.add_message(CmdMessage::warning(failure));
    }
    result.add_message(CmdMessage::success(format!(
        "Cleared font caches: {} of {} commands succeeded, {} cache files removed.",
        report.commands_run,
        plan.commands.len(),
        report.paths_removed
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::FontRecord;
    use crate::registry::mem_backend::MemBackend;
    use crate::shell::DryRunShell;
    use std::path::Path;

    fn font(path: &str, name: &str) -> FontRecord {
        FontRecord::new(path).with_postscript_name(name)
    }

    fn prune_only(backend: &MemBackend, admin: bool) -> CmdResult {
        let ctx = RunContext {
            elevated: admin,
            ..Default::default()
        };
        run(backend, &DryRunShell::new(), &ctx, CleanupMode::PruneOnly, admin).unwrap()
    }

    #[test]
    fn prunes_single_missing_file_once() {
        let backend = MemBackend::new()
            .with_stale_registration(font("/u/Gone.ttf", "Gone"), Scope::User);

        let result = prune_only(&backend, false);

        assert_eq!(
            backend.unregister_calls(),
            vec![(PathBuf::from("/u/Gone.ttf"), Scope::User)]
        );
        assert!(result.messages_at(MessageLevel::Success)[0].ends_with("checked 1, pruned 1."));
        assert!(result.messages_at(MessageLevel::Warning).is_empty());
    }

    #[test]
    fn keeps_fonts_whose_files_exist() {
        let backend = MemBackend::new()
            .with_font(font("/u/Here.ttf", "Here"), Scope::User)
            .with_stale_registration(font("/u/Gone.ttf", "Gone"), Scope::User);

        let result = prune_only(&backend, false);

        assert!(backend.is_registered(Path::new("/u/Here.ttf")));
        assert!(result.messages_at(MessageLevel::Success)[0].ends_with("checked 2, pruned 1."));
    }

    #[test]
    fn protected_registrations_are_left_alone() {
        let backend = MemBackend::new().with_stale_registration(
            font("/System/Library/Fonts/Gone.ttc", "Gone"),
            Scope::System,
        );

        let result = prune_only(&backend, true);

        assert!(backend.unregister_calls().is_empty());
        assert!(result.messages_at(MessageLevel::Success)[0].ends_with("checked 1, pruned 0."));
    }

    #[test]
    fn system_registration_needs_admin() {
        let backend = MemBackend::new()
            .with_stale_registration(font("/u/Gone.ttf", "Gone"), Scope::System);

        let result = prune_only(&backend, false);

        assert!(backend.is_registered(Path::new("/u/Gone.ttf")));
        let warnings = result.messages_at(MessageLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("/u/Gone.ttf"));
        assert!(result.messages_at(MessageLevel::Success)[0].ends_with("checked 1, pruned 0."));
    }

    #[test]
    fn admin_prunes_both_scopes() {
        let backend = MemBackend::new()
            .with_stale_registration(font("/u/Gone.ttf", "Gone"), Scope::System);

        let result = prune_only(&backend, true);

        assert!(!backend.is_registered(Path::new("/u/Gone.ttf")));
        assert_eq!(backend.unregister_calls().len(), 2);
        assert!(result.messages_at(MessageLevel::Success)[0].ends_with("checked 1, pruned 1."));
    }

    #[test]
    fn cache_only_skips_pruning() {
        let backend = MemBackend::new()
            .with_stale_registration(font("/u/Gone.ttf", "Gone"), Scope::User);
        let shell = DryRunShell::new();
        let ctx = RunContext {
            home: None,
            third_party_caches: false,
            ..Default::default()
        };

        let result = run(&backend, &shell, &ctx, CleanupMode::CacheOnly, false).unwrap();

        assert!(backend.unregister_calls().is_empty());
        assert_eq!(
            shell.commands(),
            vec![
                "atsutil 'databases' '-removeUser'",
                "atsutil 'server' '-shutdown'",
                "atsutil 'server' '-ping'",
            ]
        );
        assert!(!result.has_errors());
    }

    #[test]
    fn cache_failures_are_warnings() {
        let shell = DryRunShell::new();
        shell.fail_program("atsutil");
        let ctx = RunContext {
            restart_font_server: false,
            third_party_caches: false,
            ..Default::default()
        };

        let result = run(&MemBackend::new(), &shell, &ctx, CleanupMode::All, false).unwrap();

        assert_eq!(result.messages_at(MessageLevel::Warning).len(), 1);
        assert!(!result.has_errors());
        assert_eq!(result.messages_at(MessageLevel::Success).len(), 2);
    }

    #[test]
    fn third_party_caches_are_removed() {
        let home = tempfile::tempdir().unwrap();
        let adobe = home.path().join("Library/Caches/Adobe/Fonts");
        std::fs::create_dir_all(&adobe).unwrap();
        std::fs::write(adobe.join("AdobeFnt07.lst"), "x").unwrap();

        let shell = DryRunShell::new();
        let ctx = RunContext {
            home: Some(home.path().to_path_buf()),
            ..Default::default()
        };
        run(&MemBackend::new(), &shell, &ctx, CleanupMode::CacheOnly, false).unwrap();

        assert_eq!(shell.removed(), vec![adobe.join("AdobeFnt07.lst")]);
    }

    #[test]
    fn missing_home_warns_when_third_party_enabled() {
        let shell = DryRunShell::new();
        let result = run(
            &MemBackend::new(),
            &shell,
            &RunContext::default(),
            CleanupMode::CacheOnly,
            false,
        )
        .unwrap();
        assert!(result.messages_at(MessageLevel::Warning)[0].contains("home directory"));
    }
}
