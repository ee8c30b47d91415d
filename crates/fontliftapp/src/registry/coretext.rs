//! CoreText font manager backend (macOS only).

use super::backend::FontBackend;
use crate::error::{FontliftError, Result};
use crate::model::{FontRecord, Scope};
use core_foundation::array::{CFArray, CFArrayRef};
use core_foundation::base::{CFType, TCFType};
use core_foundation::error::{CFError, CFErrorRef};
use core_foundation::string::{CFString, CFStringRef};
use core_foundation::url::{CFURLRef, CFURL};
use core_text::font_descriptor::{
    kCTFontDisplayNameAttribute, kCTFontNameAttribute, CTFontDescriptor,
    CTFontDescriptorCopyAttribute,
};
use std::path::Path;
use std::ptr;

type CTFontManagerScope = u32;

const SCOPE_USER: CTFontManagerScope = 2;
const SCOPE_SESSION: CTFontManagerScope = 3;

#[link(name = "CoreText", kind = "framework")]
extern "C" {
    fn CTFontManagerCopyAvailableFontURLs() -> CFArrayRef;
    fn CTFontManagerCreateFontDescriptorsFromURL(url: CFURLRef) -> CFArrayRef;
    fn CTFontManagerRegisterFontsForURL(
        url: CFURLRef,
        scope: CTFontManagerScope,
        error: *mut CFErrorRef,
    ) -> bool;
    fn CTFontManagerUnregisterFontsForURL(
        url: CFURLRef,
        scope: CTFontManagerScope,
        error: *mut CFErrorRef,
    ) -> bool;
}

fn scope_code(scope: Scope) -> CTFontManagerScope {
    match scope {
        Scope::User => SCOPE_USER,
        Scope::System => SCOPE_SESSION,
    }
}

fn file_url(path: &Path) -> Result<CFURL> {
    CFURL::from_path(path, false).ok_or_else(|| {
        FontliftError::Validation(format!("Not a valid file path: {}", path.display()))
    })
}

/// Turn a CoreText out-parameter error into its description, or a generic
/// message when CoreText reported failure without one.
fn take_error(error: CFErrorRef, fallback: &str) -> String {
    if error.is_null() {
        return fallback.to_string();
    }
    let error = unsafe { CFError::wrap_under_create_rule(error) };
    error.description().to_string()
}

/// A non-empty string attribute of `descriptor`, if it has one.
fn string_attribute(descriptor: &CTFontDescriptor, attribute: CFStringRef) -> Option<String> {
    let value =
        unsafe { CTFontDescriptorCopyAttribute(descriptor.as_concrete_TypeRef(), attribute) };
    if value.is_null() {
        return None;
    }
    let value = unsafe { CFType::wrap_under_create_rule(value) };
    value
        .downcast::<CFString>()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

/// The system font manager, reached through CoreText.
#[derive(Default)]
pub struct CoreTextBackend;

impl CoreTextBackend {
    pub fn new() -> Self {
        Self
    }
}

impl FontBackend for CoreTextBackend {
    fn enumerate(&self) -> Result<Vec<FontRecord>> {
        let array = unsafe { CTFontManagerCopyAvailableFontURLs() };
        if array.is_null() {
            return Err(FontliftError::Service(
                "Could not retrieve font list".to_string(),
            ));
        }
        let urls: CFArray<CFURL> = unsafe { CFArray::wrap_under_create_rule(array) };
        log::debug!("CoreText reports {} font URLs", urls.len());

        let mut records = Vec::with_capacity(urls.len() as usize);
        for url in urls.iter() {
            let Some(path) = url.to_path() else {
                continue;
            };
            let record = self
                .describe(&path)
                .unwrap_or_else(|| FontRecord::new(path));
            records.push(record);
        }
        Ok(records)
    }

    fn describe(&self, path: &Path) -> Option<FontRecord> {
        let url = CFURL::from_path(path, false)?;
        let array = unsafe { CTFontManagerCreateFontDescriptorsFromURL(url.as_concrete_TypeRef()) };
        if array.is_null() {
            return None;
        }
        let descriptors: CFArray<CTFontDescriptor> =
            unsafe { CFArray::wrap_under_create_rule(array) };
        let descriptor = descriptors.iter().next()?;

        let mut record = FontRecord::new(path);
        if let Some(postscript) = string_attribute(&descriptor, unsafe { kCTFontNameAttribute }) {
            record = record.with_postscript_name(postscript);
        }
        if let Some(display) =
            string_attribute(&descriptor, unsafe { kCTFontDisplayNameAttribute })
        {
            record = record.with_display_name(display);
        }
        Some(record)
    }

    fn register(&self, path: &Path, scope: Scope) -> Result<()> {
        let url = file_url(path)?;
        let mut error: CFErrorRef = ptr::null_mut();
        log::debug!("CTFontManagerRegisterFontsForURL {} ({})", path.display(), scope);
        let ok = unsafe {
            CTFontManagerRegisterFontsForURL(url.as_concrete_TypeRef(), scope_code(scope), &mut error)
        };
        if ok {
            Ok(())
        } else {
            Err(FontliftError::Service(take_error(
                error,
                "Failed to install font",
            )))
        }
    }

    fn unregister(&self, path: &Path, scope: Scope) -> Result<()> {
        let url = file_url(path)?;
        let mut error: CFErrorRef = ptr::null_mut();
        log::debug!(
            "CTFontManagerUnregisterFontsForURL {} ({})",
            path.display(),
            scope
        );
        let ok = unsafe {
            CTFontManagerUnregisterFontsForURL(
                url.as_concrete_TypeRef(),
                scope_code(scope),
                &mut error,
            )
        };
        if ok {
            Ok(())
        } else {
            Err(FontliftError::Service(take_error(
                error,
                "Failed to uninstall font",
            )))
        }
    }
}
