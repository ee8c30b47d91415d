//! Font cache housekeeping.
//!
//! Clearing caches is split in two: [`plan`] decides what to run and which
//! files to delete (read-only filesystem scan), [`clear`] carries the plan
//! out through a [`Shell`]. Individual failures never abort the rest.

use crate::shell::{command_line, Shell};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const ATSUTIL: &str = "atsutil";
const ADOBE_CACHE_PREFIX: &str = "AdobeFnt";
const ADOBE_CACHE_SUFFIX: &str = ".lst";
const MAX_SCAN_DEPTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CacheCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn display(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        command_line(&self.program, &args)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheOptions {
    /// Clear every user's databases instead of only the caller's.
    pub admin: bool,
    pub restart_font_server: bool,
    pub third_party: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CachePlan {
    pub commands: Vec<CacheCommand>,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct CacheReport {
    pub commands_run: usize,
    pub paths_removed: usize,
    pub failures: Vec<String>,
}

/// Work out what clearing the caches under `home` involves.
pub fn plan(home: &Path, options: CacheOptions) -> CachePlan {
    let mut commands = Vec::new();
    if options.admin {
        commands.push(CacheCommand::new(ATSUTIL, &["databases", "-remove"]));
    } else {
        commands.push(CacheCommand::new(ATSUTIL, &["databases", "-removeUser"]));
    }
    if options.restart_font_server {
        commands.push(CacheCommand::new(ATSUTIL, &["server", "-shutdown"]));
        commands.push(CacheCommand::new(ATSUTIL, &["server", "-ping"]));
    }

    let mut paths = Vec::new();
    if options.third_party {
        let library = home.join("Library");
        for root in [
            library.join("Application Support").join("Adobe"),
            library.join("Caches").join("Adobe"),
        ] {
            collect_adobe_caches(&root, &mut paths);
        }

        let office = library
            .join("Group Containers")
            .join("UBF8T346G9.Office")
            .join("FontCache");
        if office.exists() {
            paths.push(office);
        }
    }
    paths.sort();

    CachePlan { commands, paths }
}

fn is_adobe_cache(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(ADOBE_CACHE_PREFIX) && n.ends_with(ADOBE_CACHE_SUFFIX))
        .unwrap_or(false)
}

/// A missing `root` yields only an error entry, which is skipped.
fn collect_adobe_caches(root: &Path, found: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(root)
        .max_depth(MAX_SCAN_DEPTH)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if entry.file_type().is_file() && is_adobe_cache(entry.path()) {
            found.push(entry.into_path());
        }
    }
}

/// Carry out `plan`, collecting failures instead of stopping at them.
pub fn clear<S: Shell + ?Sized>(shell: &S, plan: &CachePlan) -> CacheReport {
    let mut report = CacheReport::default();

    for command in &plan.commands {
        let args: Vec<&str> = command.args.iter().map(String::as_str).collect();
        match shell.run(&command.program, &args) {
            Ok(_) => report.commands_run += 1,
            Err(e) => {
                log::warn!("{}", e);
                report.failures.push(e.to_string());
            }
        }
    }

    for path in &plan.paths {
        match shell.remove_path(path) {
            Ok(()) => report.paths_removed += 1,
            Err(e) => {
                log::warn!("could not remove {}: {}", path.display(), e);
                report
                    .failures
                    .push(format!("Could not remove {}: {}", path.display(), e));
            }
        }
    }

    report
}
