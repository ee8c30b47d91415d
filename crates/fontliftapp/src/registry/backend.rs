use crate::error::{FontliftError, Result};
use crate::model::{FontRecord, Scope};
use std::fs;
use std::path::Path;

/// Abstract interface to the font registration service.
/// This trait covers the "how" of registration (CoreText, a JSON file, memory),
/// while the command layer owns the "what" (name matching, gating, pruning).
///
/// All methods take `&self`; implementations that hold state use interior
/// mutability since fontlift is single-threaded.
pub trait FontBackend {
    // --- Registration Service ---

    /// Every font the service currently exposes, in no particular order.
    /// A path may appear more than once (collections, multiple scopes).
    fn enumerate(&self) -> Result<Vec<FontRecord>>;

    /// Names declared by the font file at `path`.
    /// Returns None when the file is missing or its metadata is unreadable.
    fn describe(&self, path: &Path) -> Option<FontRecord>;

    /// Register the file at `path` in `scope`.
    /// Errors carry the service's own message.
    fn register(&self, path: &Path, scope: Scope) -> Result<()>;

    /// Unregister the file at `path` from `scope`.
    /// Errors carry the service's own message.
    fn unregister(&self, path: &Path, scope: Scope) -> Result<()>;

    // --- Filesystem ---

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(FontliftError::Io)
    }
}

impl<T: FontBackend + ?Sized> FontBackend for Box<T> {
    fn enumerate(&self) -> Result<Vec<FontRecord>> {
        (**self).enumerate()
    }

    fn describe(&self, path: &Path) -> Option<FontRecord> {
        (**self).describe(path)
    }

    fn register(&self, path: &Path, scope: Scope) -> Result<()> {
        (**self).register(path, scope)
    }

    fn unregister(&self, path: &Path, scope: Scope) -> Result<()> {
        (**self).unregister(path, scope)
    }

    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        (**self).delete_file(path)
    }
}

impl<T: FontBackend + ?Sized> FontBackend for &T {
    fn enumerate(&self) -> Result<Vec<FontRecord>> {
        (**self).enumerate()
    }

    fn describe(&self, path: &Path) -> Option<FontRecord> {
        (**self).describe(path)
    }

    fn register(&self, path: &Path, scope: Scope) -> Result<()> {
        (**self).register(path, scope)
    }

    fn unregister(&self, path: &Path, scope: Scope) -> Result<()> {
        (**self).unregister(path, scope)
    }

    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        (**self).delete_file(path)
    }
}
