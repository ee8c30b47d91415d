use crate::commands::helpers::{
    ensure_admin_allowed, ensure_mutable, font_label, resolve_name, scopes_label,
    unregister_all_scopes,
};
use crate::commands::{CmdMessage, CmdResult};
use crate::context::RunContext;
use crate::error::{FontliftError, Result};
use crate::model::FontTarget;
use crate::registry::FontBackend;

/// Unregister a font and delete its file.
///
/// Unregistration is best-effort (a failure is a warning); the deletion is
/// what the command is for, so a failed delete is an error.
pub fn run<B: FontBackend + ?Sized>(
    backend: &B,
    ctx: &RunContext,
    target: &FontTarget,
    admin: bool,
) -> Result<CmdResult> {
    ensure_admin_allowed(admin, ctx)?;
    let mut result = CmdResult::default();

    let records = backend.enumerate()?;
    let path = match target {
        FontTarget::Name(name) => resolve_name(&records, name, "remove")?,
        FontTarget::Path(path) => {
            if !backend.file_exists(path) {
                return Err(FontliftError::FileNotFound(path.clone()));
            }
            path.clone()
        }
    };

    ensure_mutable(&path)?;
    let label = font_label(backend, &path, &records);

    match unregister_all_scopes(backend, &path).into_result(&path, ctx) {
        Ok(scopes) => result.add_message(CmdMessage::info(format!(
            "Unregistered {} ({} scope)",
            label,
            scopes_label(&scopes)
        ))),
        Err(e) => {
            log::warn!("continuing with delete after failed unregister");
            result.add_message(CmdMessage::warning(e.to_string()));
        }
    }

    backend.delete_file(&path)?;
    log::info!("deleted {}", path.display());

    result.add_message(CmdMessage::success(format!(
        "Removed {}: {}",
        label,
        path.display()
    )));
    result.affected_fonts.push(path);
    Ok(result)
}
