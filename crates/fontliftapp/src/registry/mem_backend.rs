use super::backend::FontBackend;
use crate::error::{FontliftError, Result};
use crate::model::{FontRecord, Scope};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// In-memory font service for testing.
///
/// Keeps a virtual filesystem next to the registrations so tests can model
/// stale registrations (registered, file gone) and unregistered files
/// without touching disk. Scope failures can be injected and every
/// unregister call is recorded.
#[derive(Default)]
pub struct MemBackend {
    registrations: RefCell<Vec<(FontRecord, Scope)>>,
    files: RefCell<BTreeMap<PathBuf, FontRecord>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    failing_scopes: RefCell<HashSet<Scope>>,
    unregister_calls: RefCell<Vec<(PathBuf, Scope)>>,
    register_calls: RefCell<Vec<(PathBuf, Scope)>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file on disk that is also registered in `scope`.
    pub fn with_font(self, record: FontRecord, scope: Scope) -> Self {
        self.add_file(record.clone());
        self.registrations.borrow_mut().push((record, scope));
        self
    }

    /// A registration whose backing file does not exist.
    pub fn with_stale_registration(self, record: FontRecord, scope: Scope) -> Self {
        self.registrations.borrow_mut().push((record, scope));
        self
    }

    /// A file on disk that is not registered.
    pub fn with_file(self, record: FontRecord) -> Self {
        self.add_file(record);
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.dirs.borrow_mut().insert(path.into());
        self
    }

    pub fn add_file(&self, record: FontRecord) {
        self.files.borrow_mut().insert(record.path.clone(), record);
    }

    /// Make every register/unregister call in `scope` fail.
    pub fn fail_scope(&self, scope: Scope) {
        self.failing_scopes.borrow_mut().insert(scope);
    }

    pub fn unregister_calls(&self) -> Vec<(PathBuf, Scope)> {
        self.unregister_calls.borrow().clone()
    }

    pub fn register_calls(&self) -> Vec<(PathBuf, Scope)> {
        self.register_calls.borrow().clone()
    }

    pub fn is_registered(&self, path: &Path) -> bool {
        self.registrations
            .borrow()
            .iter()
            .any(|(record, _)| record.path == path)
    }

    pub fn scopes_of(&self, path: &Path) -> Vec<Scope> {
        self.registrations
            .borrow()
            .iter()
            .filter(|(record, _)| record.path == path)
            .map(|(_, scope)| *scope)
            .collect()
    }

    fn check_scope(&self, scope: Scope) -> Result<()> {
        if self.failing_scopes.borrow().contains(&scope) {
            return Err(FontliftError::Service(format!(
                "Simulated {} scope failure",
                scope
            )));
        }
        Ok(())
    }
}

impl FontBackend for MemBackend {
    fn enumerate(&self) -> Result<Vec<FontRecord>> {
        Ok(self
            .registrations
            .borrow()
            .iter()
            .map(|(record, _)| record.clone())
            .collect())
    }

    fn describe(&self, path: &Path) -> Option<FontRecord> {
        self.files.borrow().get(path).cloned()
    }

    fn register(&self, path: &Path, scope: Scope) -> Result<()> {
        self.register_calls
            .borrow_mut()
            .push((path.to_path_buf(), scope));
        self.check_scope(scope)?;

        let record = self
            .describe(path)
            .ok_or_else(|| FontliftError::Service(format!("No font file at {}", path.display())))?;
        if self.scopes_of(path).contains(&scope) {
            return Err(FontliftError::Service(format!(
                "The font is already registered in the {} scope",
                scope
            )));
        }
        self.registrations.borrow_mut().push((record, scope));
        Ok(())
    }

    fn unregister(&self, path: &Path, scope: Scope) -> Result<()> {
        self.unregister_calls
            .borrow_mut()
            .push((path.to_path_buf(), scope));
        self.check_scope(scope)?;

        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|(record, s)| !(record.path == path && *s == scope));
        if registrations.len() == before {
            return Err(FontliftError::Service(format!(
                "The font is not registered in the {} scope",
                scope
            )));
        }
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        match self.files.borrow_mut().remove(path) {
            Some(_) => Ok(()),
            None => Err(FontliftError::FileNotFound(path.to_path_buf())),
        }
    }
}
