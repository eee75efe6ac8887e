//! C-ABI wrapper around `httpline-core`.
//!
//! # Overview
//! Exposes the line formatter through `extern "C"` functions so a transport
//! written in any language with a C FFI can format request lines, status
//! lines and headers, then add CRLF and write them itself.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A null formatter selects the shared default; a null buffer asks for a
//!   fresh one. A null structured value is rejected with `NullArg`, and a
//!   string that is not UTF-8 with `InvalidUtf8`, before the buffer is
//!   touched.
//! - A single `FfiFormatResult` envelope carries either a copy of the
//!   formatted line or an error.
//! - The C caller owns all returned pointers and must call the matching
//!   `lf_*_free` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use httpline_core::{
    BasicLineFormatter, CharBuffer, FormattedHeader, FormatterConfig, Header, LineFormatter, DEFAULT,
};
use tracing::debug;

use types::*;

// ---------------------------------------------------------------------------
// Formatter lifecycle
// ---------------------------------------------------------------------------

/// Create a formatter whose freshly allocated header buffers hold
/// `default_capacity` bytes.
///
/// The caller must free the returned pointer with `lf_formatter_free`.
#[unsafe(no_mangle)]
pub extern "C" fn lf_formatter_new(default_capacity: usize) -> *mut FfiLineFormatter {
    catch_unwind(|| {
        let inner = BasicLineFormatter::with_config(FormatterConfig { default_capacity });
        Box::into_raw(Box::new(FfiLineFormatter { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a formatter created by `lf_formatter_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_formatter_free(formatter: *mut FfiLineFormatter) {
    if !formatter.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(formatter) });
        });
    }
}

// ---------------------------------------------------------------------------
// Buffer lifecycle
// ---------------------------------------------------------------------------

/// Create an empty buffer with room for `capacity` bytes.
///
/// The caller must free the returned pointer with `lf_buffer_free`.
#[unsafe(no_mangle)]
pub extern "C" fn lf_buffer_new(capacity: usize) -> *mut FfiLineBuffer {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiLineBuffer {
            inner: CharBuffer::with_capacity(capacity),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a buffer created by `lf_buffer_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_buffer_free(buffer: *mut FfiLineBuffer) {
    if !buffer.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(buffer) });
        });
    }
}

/// Length of the buffer's content in bytes. Zero for null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_buffer_len(buffer: *const FfiLineBuffer) -> usize {
    unsafe { buffer.as_ref() }.map_or(0, |b| b.inner.len())
}

/// Allocated capacity of the buffer in bytes. Zero for null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_buffer_capacity(buffer: *const FfiLineBuffer) -> usize {
    unsafe { buffer.as_ref() }.map_or(0, |b| b.inner.capacity())
}

/// Copy the buffer's content into a new C string.
///
/// Returns null if `buffer` is null. Free the result with `lf_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn lf_buffer_to_string(buffer: *const FfiLineBuffer) -> *mut c_char {
    catch_unwind(|| match unsafe { buffer.as_ref() } {
        Some(b) => CString::new(b.inner.as_str()).unwrap_or_default().into_raw(),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Format functions
// ---------------------------------------------------------------------------

fn formatter_or_default<'a>(formatter: *const FfiLineFormatter) -> &'a dyn LineFormatter {
    match unsafe { formatter.as_ref() } {
        Some(f) => &f.inner,
        None => &DEFAULT,
    }
}

/// Resolve the nullable handles and run one format call.
///
/// `format` converts its input first and only then writes, so a rejected
/// input leaves the buffer as it was.
fn run_format<F>(
    op: &'static str,
    formatter: *const FfiLineFormatter,
    buffer: *mut FfiLineBuffer,
    format: F,
) -> *mut FfiFormatResult
where
    F: FnOnce(&dyn LineFormatter, Option<&mut CharBuffer>) -> Result<String, InputError>,
{
    catch_unwind(AssertUnwindSafe(|| {
        let formatter = formatter_or_default(formatter);
        let buffer = unsafe { buffer.as_mut() }.map(|b| &mut b.inner);
        match format(formatter, buffer) {
            Ok(line) => FfiFormatResult::ok(&line),
            Err(err) => {
                debug!(op, %err, "rejected format call");
                FfiFormatResult::from_error(err)
            }
        }
    }))
    .unwrap_or_else(|_| FfiFormatResult::panic(&format!("panic in {op}")))
}

/// Format a protocol version, e.g. `HTTP/1.1`.
///
/// `formatter` and `buffer` may be null. Returns `NullArg` if `version` or
/// its protocol name is null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_format_protocol_version(
    formatter: *const FfiLineFormatter,
    buffer: *mut FfiLineBuffer,
    version: *const FfiProtocolVersion,
) -> *mut FfiFormatResult {
    run_format("lf_format_protocol_version", formatter, buffer, |f, buf| {
        let version = unsafe { version_to_core(version) }?;
        Ok(f.format_protocol_version(buf, &version).as_str().to_string())
    })
}

/// Format a request line, e.g. `GET /index.html HTTP/1.1`.
///
/// `formatter` and `buffer` may be null. Returns `NullArg` if `line` or any
/// of its fields is null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_format_request_line(
    formatter: *const FfiLineFormatter,
    buffer: *mut FfiLineBuffer,
    line: *const FfiRequestLine,
) -> *mut FfiFormatResult {
    run_format("lf_format_request_line", formatter, buffer, |f, buf| {
        let line = unsafe { request_line_to_core(line) }?;
        Ok(f.format_request_line(buf, &line).as_str().to_string())
    })
}

/// Format a status line, e.g. `HTTP/1.1 200 OK`.
///
/// A null reason phrase leaves the line ending in a space.
#[unsafe(no_mangle)]
pub extern "C" fn lf_format_status_line(
    formatter: *const FfiLineFormatter,
    buffer: *mut FfiLineBuffer,
    line: *const FfiStatusLine,
) -> *mut FfiFormatResult {
    run_format("lf_format_status_line", formatter, buffer, |f, buf| {
        let line = unsafe { status_line_to_core(line) }?;
        Ok(f.format_status_line(buf, &line).as_str().to_string())
    })
}

/// Format a header, e.g. `Accept: */*`.
///
/// A null value leaves the line ending in `": "`.
#[unsafe(no_mangle)]
pub extern "C" fn lf_format_header(
    formatter: *const FfiLineFormatter,
    buffer: *mut FfiLineBuffer,
    header: *const FfiHeader,
) -> *mut FfiFormatResult {
    run_format("lf_format_header", formatter, buffer, |f, buf| {
        let header = Header::Plain(unsafe { header_to_core(header) }?);
        Ok(f.format_header(buf, &header).as_str().to_string())
    })
}

// ---------------------------------------------------------------------------
// Pre-rendered headers
// ---------------------------------------------------------------------------

/// Render `header` once and keep the line for repeated sends.
///
/// On success `*out` receives the new handle and the result carries the
/// rendered line; free the handle with `lf_formatted_header_free`. On
/// failure `*out` is set to null. Returns `NullArg` if `out`, `header` or
/// the header name is null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_prerender_header(
    formatter: *const FfiLineFormatter,
    header: *const FfiHeader,
    out: *mut *mut FfiFormattedHeader,
) -> *mut FfiFormatResult {
    catch_unwind(AssertUnwindSafe(|| {
        let Some(out) = (unsafe { out.as_mut() }) else {
            debug!("rejected header pre-render without output slot");
            let err = httpline_core::FormatError::NullArgument("Output handle");
            return FfiFormatResult::from_error(err.into());
        };
        *out = std::ptr::null_mut();
        match unsafe { header_to_core(header) } {
            Ok(header) => {
                let formatted = FormattedHeader::prerender(formatter_or_default(formatter), header);
                let result = FfiFormatResult::ok(formatted.buffer().as_str());
                *out = Box::into_raw(Box::new(FfiFormattedHeader {
                    inner: Header::Formatted(formatted),
                }));
                result
            }
            Err(err) => {
                debug!(%err, "rejected header pre-render");
                FfiFormatResult::from_error(err)
            }
        }
    }))
    .unwrap_or_else(|_| FfiFormatResult::panic("panic in lf_prerender_header"))
}

/// Format a pre-rendered header. The result is the stored line; `buffer` is
/// not written.
#[unsafe(no_mangle)]
pub extern "C" fn lf_format_formatted_header(
    formatter: *const FfiLineFormatter,
    buffer: *mut FfiLineBuffer,
    header: *const FfiFormattedHeader,
) -> *mut FfiFormatResult {
    run_format("lf_format_formatted_header", formatter, buffer, |f, buf| {
        let header = httpline_core::require(unsafe { header.as_ref() }, "Header")?;
        Ok(f.format_header(buf, &header.inner).as_str().to_string())
    })
}

/// Free a header created by `lf_prerender_header`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_formatted_header_free(header: *mut FfiFormattedHeader) {
    if !header.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(header) });
        });
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiFormatResult` returned by any `lf_format_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_free_result(result: *mut FfiFormatResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.line.is_null() {
            drop(unsafe { CString::from_raw(result.line) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn lf_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
