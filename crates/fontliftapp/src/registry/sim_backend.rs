use super::backend::FontBackend;
use crate::error::{FontliftError, Result};
use crate::model::{FontRecord, Scope};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed stand-in for the system font service.
///
/// The registry is a flat JSON object mapping font name to file path:
///
/// ```json
/// { "Inter-Regular": "/Users/me/fonts/Inter-Regular.ttf" }
/// ```
///
/// Font files are real files on disk (their contents are never read); a
/// file's name is its file stem. The registry does not track scope: a
/// registration in either scope is stored once and the first unregister
/// attempt removes it.
pub struct SimBackend {
    registry_path: PathBuf,
}

impl SimBackend {
    pub fn new(registry_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
        }
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    fn load(&self) -> Result<BTreeMap<String, PathBuf>> {
        if !self.registry_path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.registry_path).map_err(FontliftError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let map: BTreeMap<String, PathBuf> =
            serde_json::from_str(&content).map_err(FontliftError::Serialization)?;
        Ok(map)
    }

    fn save(&self, map: &BTreeMap<String, PathBuf>) -> Result<()> {
        if let Some(parent) = self.registry_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(FontliftError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(map).map_err(FontliftError::Serialization)?;

        // Atomic write
        let tmp_path = self
            .registry_path
            .with_extension(format!("{}.tmp", std::process::id()));
        fs::write(&tmp_path, content).map_err(FontliftError::Io)?;
        fs::rename(&tmp_path, &self.registry_path).map_err(FontliftError::Io)?;
        Ok(())
    }
}

fn stem_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

impl FontBackend for SimBackend {
    fn enumerate(&self) -> Result<Vec<FontRecord>> {
        let map = self.load()?;
        Ok(map
            .into_iter()
            .map(|(name, path)| FontRecord::new(path).with_postscript_name(name))
            .collect())
    }

    fn describe(&self, path: &Path) -> Option<FontRecord> {
        if !path.is_file() {
            return None;
        }
        let name = stem_name(path)?;
        Some(FontRecord::new(path).with_postscript_name(name))
    }

    fn register(&self, path: &Path, scope: Scope) -> Result<()> {
        log::debug!("simulated register {} ({})", path.display(), scope);
        let name = self.describe(path).and_then(|r| r.postscript_name).ok_or_else(|| {
            FontliftError::Service(format!("Could not read font file {}", path.display()))
        })?;

        let mut map = self.load()?;
        match map.get(&name) {
            Some(existing) if existing == path => {
                return Err(FontliftError::Service(format!(
                    "The font {} is already registered",
                    path.display()
                )));
            }
            Some(existing) => {
                return Err(FontliftError::Service(format!(
                    "A font named '{}' is already registered from {}",
                    name,
                    existing.display()
                )));
            }
            None => {}
        }
        map.insert(name, path.to_path_buf());
        self.save(&map)
    }

    fn unregister(&self, path: &Path, scope: Scope) -> Result<()> {
        log::debug!("simulated unregister {} ({})", path.display(), scope);
        let mut map = self.load()?;
        let before = map.len();
        map.retain(|_, registered| registered != path);
        if map.len() == before {
            return Err(FontliftError::Service(format!(
                "The font {} is not registered",
                path.display()
            )));
        }
        self.save(&map)
    }
}
