use crate::commands::helpers::{
    distinct_paths, elevation_hint, ensure_admin_allowed, is_protected_path,
    is_valid_font_extension, scopes_label, unregister_all_scopes, FONT_EXTENSIONS,
};
use crate::commands::{CmdMessage, CmdResult};
use crate::context::RunContext;
use crate::error::{FontliftError, Result};
use crate::model::{describe_label, Scope};
use crate::registry::FontBackend;
use std::path::{Path, PathBuf};

/// Install each of `paths`, independently.
///
/// A failure on one file is reported as an error message and the remaining
/// files are still processed. Only the up-front `--admin` check returns `Err`.
pub fn run<B: FontBackend + ?Sized>(
    backend: &B,
    ctx: &RunContext,
    paths: &[PathBuf],
    admin: bool,
) -> Result<CmdResult> {
    ensure_admin_allowed(admin, ctx)?;
    if paths.is_empty() {
        return Err(FontliftError::Validation(
            "Specify at least one font path".to_string(),
        ));
    }

    let scope = if admin { Scope::System } else { Scope::User };
    let mut result = CmdResult::default();

    for path in paths {
        if let Err(e) = install_one(backend, ctx, path, scope, &mut result) {
            log::info!("install of {} failed: {}", path.display(), e);
            result.add_message(CmdMessage::error(e.to_string()));
        }
    }

    Ok(result)
}

fn validate_font_file<B: FontBackend + ?Sized>(backend: &B, path: &Path) -> Result<()> {
    if backend.is_dir(path) {
        return Err(FontliftError::Validation(format!(
            "{} is a directory, not a font file",
            path.display()
        )));
    }
    if !backend.file_exists(path) {
        return Err(FontliftError::FileNotFound(path.to_path_buf()));
    }
    if !is_valid_font_extension(path) {
        return Err(FontliftError::Validation(format!(
            "{} is not a supported font file (expected one of: {})",
            path.display(),
            FONT_EXTENSIONS
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}

pub fn install_one<B: FontBackend + ?Sized>(
    backend: &B,
    ctx: &RunContext,
    path: &Path,
    scope: Scope,
    result: &mut CmdResult,
) -> Result<()> {
    validate_font_file(backend, path)?;

    let record = backend.describe(path);
    let label = describe_label(record.as_ref());

    if let Some(name) = record.as_ref().and_then(|r| r.resolved_name()) {
        let records = backend.enumerate()?;
        let conflicts: Vec<PathBuf> = distinct_paths(&records)
            .into_iter()
            .filter(|other| other != path)
            .filter(|other| {
                records
                    .iter()
                    .any(|r| &r.path == other && r.resolved_name() == Some(name))
            })
            .collect();

        // Nothing is touched until every conflict is known to be removable.
        if let Some(conflict) = conflicts.iter().find(|c| is_protected_path(c)) {
            return Err(FontliftError::ProtectedConflict {
                path: path.to_path_buf(),
                conflict: conflict.clone(),
                name: name.to_string(),
            });
        }

        for conflict in &conflicts {
            let outcome = unregister_all_scopes(backend, conflict);
            if outcome.is_success() {
                result.add_message(CmdMessage::info(format!(
                    "Unregistered conflicting {} ({} scope): {}",
                    name,
                    scopes_label(&outcome.succeeded),
                    conflict.display()
                )));
                result.affected_fonts.push(conflict.clone());
            } else {
                let reasons: Vec<String> = outcome
                    .failures
                    .iter()
                    .map(|(s, msg)| format!("{} scope: {}", s, msg))
                    .collect();
                log::warn!("could not unregister conflict {}", conflict.display());
                result.add_message(CmdMessage::warning(format!(
                    "Could not unregister conflicting {} at {} ({})",
                    name,
                    conflict.display(),
                    reasons.join("; ")
                )));
            }
        }
    } else {
        log::info!(
            "no readable name in {}; skipping conflict check",
            path.display()
        );
    }

    backend
        .register(path, scope)
        .map_err(|e| FontliftError::RegisterFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
            hint: if scope == Scope::System {
                elevation_hint(ctx)
            } else {
                None
            },
        })?;

    result.add_message(CmdMessage::success(format!(
        "Installed {} ({} scope): {}",
        label,
        scope,
        path.display()
    )));
    result.affected_fonts.push(path.to_path_buf());
    Ok(())
}
