//! Process and filesystem side effects used by cache clearing.
//!
//! [`SystemShell`] runs commands for real. [`DryRunShell`] records what
//! would have happened; it backs simulation mode and the tests.

use crate::commands::helpers::shell_escape;
use crate::error::{FontliftError, Result};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait Shell {
    /// Run `program` with `args`, returning stdout.
    /// A non-zero exit status is an error carrying stderr.
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;

    /// Delete a file or a directory tree.
    fn remove_path(&self, path: &Path) -> Result<()>;
}

impl<T: Shell + ?Sized> Shell for Box<T> {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        (**self).run(program, args)
    }

    fn remove_path(&self, path: &Path) -> Result<()> {
        (**self).remove_path(path)
    }
}

/// Render a command line for logs and messages.
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&shell_escape(arg));
    }
    line
}

#[derive(Debug, Default)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        log::debug!("running: {}", command_line(program, args));
        let output = Command::new(program).args(args).output().map_err(|e| {
            FontliftError::Service(format!("Could not run {}: {}", program, e))
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            Err(FontliftError::Service(format!(
                "{} failed: {}",
                command_line(program, args),
                detail
            )))
        }
    }

    fn remove_path(&self, path: &Path) -> Result<()> {
        log::debug!("removing {}", path.display());
        if path.is_dir() {
            fs::remove_dir_all(path).map_err(FontliftError::Io)
        } else {
            fs::remove_file(path).map_err(FontliftError::Io)
        }
    }
}

/// Records commands and removals instead of performing them.
#[derive(Debug, Default)]
pub struct DryRunShell {
    commands: RefCell<Vec<String>>,
    removed: RefCell<Vec<PathBuf>>,
    failing_programs: RefCell<Vec<String>>,
}

impl DryRunShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` fail.
    pub fn fail_program(&self, program: &str) {
        self.failing_programs.borrow_mut().push(program.to_string());
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.borrow().clone()
    }
}

impl Shell for DryRunShell {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let line = command_line(program, args);
        log::info!("[dry run] {}", line);
        self.commands.borrow_mut().push(line.clone());
        if self.failing_programs.borrow().iter().any(|p| p == program) {
            return Err(FontliftError::Service(format!("{} failed", line)));
        }
        Ok(String::new())
    }

    fn remove_path(&self, path: &Path) -> Result<()> {
        log::info!("[dry run] remove {}", path.display());
        self.removed.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
