//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using docoutline from other
//! languages such as C#, Python, and Node.js.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::model::DocumentOutline;
use crate::render::{self, JsonFormat};
use crate::{extract_file_with_options, ExtractOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct DocOutlineResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The outline JSON. Must be freed with `docoutline_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `docoutline_free_result`.
    pub error: *mut c_char,
}

impl DocOutlineResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }

    /// Failure that still carries the structured error outline as data.
    fn failed(message: String, format: JsonFormat) -> Self {
        let data = render::to_json(&DocumentOutline::failed(message.clone()), format)
            .ok()
            .and_then(|json| CString::new(json).ok())
            .map_or(ptr::null_mut(), CString::into_raw);
        Self {
            success: false,
            data,
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

/// Extract the outline of a PDF file as JSON.
///
/// On failure `data` holds the structured error outline
/// (`"title": "Error extracting title"`) and `error` the message.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docoutline_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docoutline_extract_json(
    path: *const c_char,
    pretty: bool,
) -> DocOutlineResult {
    if path.is_null() {
        return DocOutlineResult::error("Path cannot be null".to_string());
    }

    let path_str = match CStr::from_ptr(path).to_str() {
        Ok(s) => s,
        Err(_) => return DocOutlineResult::error("Invalid UTF-8 path".to_string()),
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    match extract_json_internal(Path::new(path_str), format) {
        Ok(json) => DocOutlineResult::success(json),
        Err(e) => DocOutlineResult::failed(e.to_string(), format),
    }
}

fn extract_json_internal(path: &Path, format: JsonFormat) -> crate::Result<String> {
    let options = ExtractOptions::new().lenient();
    let outline = extract_file_with_options(path, options)?;
    render::to_json(&outline, format)
}

/// Free a result returned by any docoutline function.
///
/// # Safety
///
/// The `result` must have been returned by a docoutline function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn docoutline_free_result(result: DocOutlineResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Get the version of the docoutline library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn docoutline_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
