//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Inputs mirror the core value types with borrowed C strings and nested
//! pointers, so a C caller can build them on the stack. Every pointer is
//! nullable on the C side; conversion to core values goes through
//! `httpline_core::require`, which turns a null into `FormatError` before
//! anything is formatted. Strings must be UTF-8 and are copied byte for
//! byte; anything else is rejected with `InputError::InvalidUtf8`. Handles
//! and the result envelope are heap-allocated here and released by the
//! matching `lf_*_free` function.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use httpline_core::{
    require, BasicHeader, BasicLineFormatter, CharBuffer, FormatError, Header, ProtocolVersion, RequestLine,
    StatusLine,
};
use thiserror::Error;

/// Opaque handle to a `BasicLineFormatter`.
pub struct FfiLineFormatter {
    pub(crate) inner: BasicLineFormatter,
}

/// Opaque handle to a reusable output buffer.
pub struct FfiLineBuffer {
    pub(crate) inner: CharBuffer,
}

/// Opaque handle to a header rendered once by `lf_prerender_header`.
pub struct FfiFormattedHeader {
    pub(crate) inner: Header,
}

// ---------------------------------------------------------------------------
// Input types (caller-provided, read but never freed by us)
// ---------------------------------------------------------------------------

/// Protocol version, e.g. `{"HTTP", 1, 1}`.
#[repr(C)]
pub struct FfiProtocolVersion {
    pub protocol: *const c_char,
    pub major: i32,
    pub minor: i32,
}

/// Request line. All pointers are required.
#[repr(C)]
pub struct FfiRequestLine {
    pub method: *const c_char,
    pub uri: *const c_char,
    pub protocol_version: *const FfiProtocolVersion,
}

/// Status line. `reason_phrase` may be null.
#[repr(C)]
pub struct FfiStatusLine {
    pub protocol_version: *const FfiProtocolVersion,
    pub status_code: i32,
    pub reason_phrase: *const c_char,
}

/// Header. `value` may be null.
#[repr(C)]
pub struct FfiHeader {
    pub name: *const c_char,
    pub value: *const c_char,
}

/// Why a C input could not become a core value.
#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
}

/// # Safety
/// `ptr` must point to a NUL-terminated string.
unsafe fn decode(ptr: *const c_char, name: &'static str) -> Result<String, InputError> {
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(str::to_string)
        .map_err(|_| InputError::InvalidUtf8(name))
}

/// Read a required C string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn required_str(ptr: *const c_char, name: &'static str) -> Result<String, InputError> {
    let ptr = require(unsafe { ptr.as_ref() }, name)?;
    unsafe { decode(ptr, name) }
}

/// Read an optional C string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn optional_str(ptr: *const c_char, name: &'static str) -> Result<Option<String>, InputError> {
    if ptr.is_null() {
        return Ok(None);
    }
    unsafe { decode(ptr, name) }.map(Some)
}

/// # Safety
/// `ptr` must be null or point to a valid `FfiProtocolVersion`.
pub(crate) unsafe fn version_to_core(ptr: *const FfiProtocolVersion) -> Result<ProtocolVersion, InputError> {
    let version = require(unsafe { ptr.as_ref() }, "Protocol version")?;
    Ok(ProtocolVersion {
        protocol: unsafe { required_str(version.protocol, "Protocol name") }?,
        major: version.major,
        minor: version.minor,
    })
}

/// # Safety
/// `ptr` must be null or point to a valid `FfiRequestLine`.
pub(crate) unsafe fn request_line_to_core(ptr: *const FfiRequestLine) -> Result<RequestLine, InputError> {
    let line = require(unsafe { ptr.as_ref() }, "Request line")?;
    Ok(RequestLine {
        method: unsafe { required_str(line.method, "Method") }?,
        uri: unsafe { required_str(line.uri, "URI") }?,
        protocol_version: unsafe { version_to_core(line.protocol_version) }?,
    })
}

/// # Safety
/// `ptr` must be null or point to a valid `FfiStatusLine`.
pub(crate) unsafe fn status_line_to_core(ptr: *const FfiStatusLine) -> Result<StatusLine, InputError> {
    let line = require(unsafe { ptr.as_ref() }, "Status line")?;
    Ok(StatusLine {
        protocol_version: unsafe { version_to_core(line.protocol_version) }?,
        status_code: line.status_code,
        reason_phrase: unsafe { optional_str(line.reason_phrase, "Reason phrase") }?,
    })
}

/// # Safety
/// `ptr` must be null or point to a valid `FfiHeader`.
pub(crate) unsafe fn header_to_core(ptr: *const FfiHeader) -> Result<BasicHeader, InputError> {
    let header = require(unsafe { ptr.as_ref() }, "Header")?;
    Ok(BasicHeader {
        name: unsafe { required_str(header.name, "Header name") }?,
        value: unsafe { optional_str(header.value, "Header value") }?,
    })
}

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiFormatResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NullArg = 1,
    Panic = 2,
    InvalidUtf8 = 3,
}

/// Result envelope for all format operations.
///
/// On success `error_code` is `Ok`, `error_message` is null and `line` holds
/// a copy of the formatted text. On failure `line` is null and
/// `error_message` describes the problem.
#[repr(C)]
pub struct FfiFormatResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub line: *mut c_char,
}

impl FfiFormatResult {
    pub(crate) fn ok(line: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiFormatResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            line: CString::new(line).unwrap_or_default().into_raw(),
        }))
    }

    pub(crate) fn from_error(err: InputError) -> *mut Self {
        let error_code = match err {
            InputError::Format(FormatError::NullArgument(_)) => FfiErrorCode::NullArg,
            InputError::InvalidUtf8(_) => FfiErrorCode::InvalidUtf8,
        };
        Box::into_raw(Box::new(FfiFormatResult {
            error_code,
            error_message: CString::new(err.to_string()).unwrap_or_default().into_raw(),
            line: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiFormatResult {
            error_code: FfiErrorCode::Panic,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            line: std::ptr::null_mut(),
        }))
    }
}
