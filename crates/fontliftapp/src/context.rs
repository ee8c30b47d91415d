use crate::config::FontliftConfig;
use directories::BaseDirs;
use std::path::PathBuf;

/// Facts about the invocation that commands consult but never change.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Running with an effective uid of 0.
    pub elevated: bool,
    /// Backed by the simulated registry instead of the real font service.
    pub simulated: bool,
    /// Home directory, used to find third-party font caches.
    pub home: Option<PathBuf>,
    pub third_party_caches: bool,
    pub restart_font_server: bool,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            elevated: false,
            simulated: false,
            home: None,
            third_party_caches: true,
            restart_font_server: true,
        }
    }
}

impl RunContext {
    pub fn from_config(config: &FontliftConfig, simulated: bool) -> Self {
        Self {
            elevated: is_elevated(),
            simulated,
            home: BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
            third_party_caches: config.third_party_caches,
            restart_font_server: config.restart_font_server,
        }
    }
}

#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    false
}
