use crate::registry::sim_backend::SimBackend;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub backend: SimBackend,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir
            .path()
            .canonicalize()
            .expect("failed to resolve temp dir");
        let backend = SimBackend::new(root.join("registry.json"));
        Self {
            _temp_dir: temp_dir,
            backend,
            root,
        }
    }

    /// Create a dummy font file under `root/fonts`.
    pub fn write_font(&self, file_name: &str) -> PathBuf {
        let dir = self.root.join("fonts");
        fs::create_dir_all(&dir).expect("failed to create font dir");
        let path = dir.join(file_name);
        fs::write(&path, b"not really a font").expect("failed to write font");
        path
    }
}
