//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for fontlift operations, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs**: name-or-path targets become a [`FontTarget`], relative
//!   paths become absolute (and canonical where the file exists), so that
//!   comparisons with the paths the font service reports are meaningful
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O operations**: no stdout or stderr
//!
//! ## Generic Over the Backends
//!
//! `FontliftApi<B: FontBackend, S: Shell>`:
//! - Production: `FontliftApi<Box<dyn FontBackend>, Box<dyn Shell>>` backed by CoreText
//!   and [`crate::shell::SystemShell`]
//! - Simulation: [`crate::registry::sim_backend::SimBackend`] and
//!   [`crate::shell::DryRunShell`]
//! - Testing: [`crate::registry::mem_backend::MemBackend`]

use crate::commands::cleanup::CleanupMode;
use crate::commands::list::ListOptions;
use crate::commands::{self, CmdResult};
use crate::context::RunContext;
use crate::error::Result;
use crate::model::FontTarget;
use crate::registry::FontBackend;
use crate::shell::Shell;
use std::path::{Path, PathBuf};

pub struct FontliftApi<B: FontBackend, S: Shell> {
    backend: B,
    shell: S,
    ctx: RunContext,
}

impl<B: FontBackend, S: Shell> FontliftApi<B, S> {
    pub fn new(backend: B, shell: S, ctx: RunContext) -> Self {
        Self {
            backend,
            shell,
            ctx,
        }
    }

    pub fn list(&self, options: ListOptions) -> Result<CmdResult> {
        commands::list::run(&self.backend, options)
    }

    pub fn install(&self, paths: &[PathBuf], admin: bool) -> Result<CmdResult> {
        let paths: Vec<PathBuf> = paths.iter().map(|p| normalize_path(p)).collect();
        commands::install::run(&self.backend, &self.ctx, &paths, admin)
    }

    pub fn uninstall(
        &self,
        name: Option<String>,
        path: Option<PathBuf>,
        admin: bool,
    ) -> Result<CmdResult> {
        let target = normalize_target(FontTarget::from_args(name, path)?);
        commands::uninstall::run(&self.backend, &self.ctx, &target, admin)
    }

    pub fn remove(
        &self,
        name: Option<String>,
        path: Option<PathBuf>,
        admin: bool,
    ) -> Result<CmdResult> {
        let target = normalize_target(FontTarget::from_args(name, path)?);
        commands::remove::run(&self.backend, &self.ctx, &target, admin)
    }

    pub fn cleanup(&self, mode: CleanupMode, admin: bool) -> Result<CmdResult> {
        commands::cleanup::run(&self.backend, &self.shell, &self.ctx, mode, admin)
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }
}

fn normalize_target(target: FontTarget) -> FontTarget {
    match target {
        FontTarget::Path(path) => FontTarget::Path(normalize_path(&path)),
        name => name,
    }
}

/// Canonical form when the file exists, otherwise made absolute against the
/// working directory.
fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
