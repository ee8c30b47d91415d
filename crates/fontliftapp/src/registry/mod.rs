//! # Font Registration Layer
//!
//! Everything fontlift knows about installed fonts comes from a font
//! registration service. The [`FontBackend`] trait is the seam between the
//! command layer and that service.
//!
//! ## Implementations
//!
//! - [`coretext::CoreTextBackend`] (macOS): the CoreText font manager.
//!   - Enumeration via `CTFontManagerCopyAvailableFontURLs`
//!   - Names via `CTFontManagerCreateFontDescriptorsFromURL`
//!   - User scope maps to `kCTFontManagerScopeUser`, system scope to
//!     `kCTFontManagerScopeSession`
//!
//! - [`sim_backend::SimBackend`]: a JSON name→path registry on disk. Used
//!   when `--simulate` or `FONTLIFT_SIMULATE` is set, so the CLI can be
//!   driven end to end without touching the real font service.
//!
//! - [`mem_backend::MemBackend`]: in-memory service with a virtual
//!   filesystem, failure injection and call recording, for unit tests.
//!
//! ## Identity
//!
//! A registration is identified by the font file path. Names are derived,
//! not stored: PostScript name first, display name as fallback (see
//! [`crate::model::FontRecord::resolved_name`]).

use crate::error::Result;

pub mod backend;
#[cfg(target_os = "macos")]
pub mod coretext;
pub mod mem_backend;
pub mod sim_backend;

pub use backend::FontBackend;

/// The platform's own font service.
#[cfg(target_os = "macos")]
pub fn native_backend() -> Result<Box<dyn FontBackend>> {
    Ok(Box::new(coretext::CoreTextBackend::new()))
}

/// The platform's own font service.
#[cfg(not(target_os = "macos"))]
pub fn native_backend() -> Result<Box<dyn FontBackend>> {
    Err(crate::error::FontliftError::Unsupported(
        "fontlift manages fonts through CoreText, which is only available on macOS. \
         Use --simulate <REGISTRY.json> to run against a simulated registry."
            .to_string(),
    ))
}
