//! Formatting of protocol versions, request lines, status lines and headers.
//!
//! # Design
//! `LineFormatter` is the pluggable contract the rest of a client stack
//! writes through; `BasicLineFormatter` is the stock implementation and
//! `DEFAULT` a shared instance of it. Implementations hold no per-call state
//! and may be shared between threads.
//!
//! Every `format_*` operation takes an optional caller buffer. A supplied
//! buffer is cleared (its allocation kept) and returned borrowed; otherwise a
//! new buffer is allocated and returned owned. `append_protocol_version` is
//! the one operation that writes onto existing content, so request and status
//! lines can delegate the version token into the buffer they are filling.
//!
//! None of the output carries a line terminator.

use std::borrow::Cow;

use tracing::trace;

use crate::buffer::CharBuffer;
use crate::config::FormatterConfig;
use crate::header::{Header, NameValuePair};
use crate::types::{ProtocolVersion, RequestLine, StatusLine};

/// Writes the head elements of an HTTP message as text.
pub trait LineFormatter: Send + Sync {
    /// Append `<protocol>/<major>.<minor>` after whatever `buffer` already
    /// holds.
    fn append_protocol_version(&self, buffer: &mut CharBuffer, version: &ProtocolVersion);

    /// Format a protocol version on its own.
    fn format_protocol_version<'b>(
        &self,
        buffer: Option<&'b mut CharBuffer>,
        version: &ProtocolVersion,
    ) -> Cow<'b, CharBuffer>;

    /// Format `<method> <uri> <version>`.
    fn format_request_line<'b>(
        &self,
        buffer: Option<&'b mut CharBuffer>,
        line: &RequestLine,
    ) -> Cow<'b, CharBuffer>;

    /// Format `<version> <code> <reason>`. The space after the code is
    /// written even when there is no reason phrase.
    fn format_status_line<'b>(
        &self,
        buffer: Option<&'b mut CharBuffer>,
        line: &StatusLine,
    ) -> Cow<'b, CharBuffer>;

    /// Format `<name>: <value>`. A pre-rendered header comes back as its own
    /// buffer, and `buffer` is left alone.
    fn format_header<'b>(&self, buffer: Option<&'b mut CharBuffer>, header: &'b Header) -> Cow<'b, CharBuffer>;
}

/// The buffer a formatting call writes into.
#[derive(Debug)]
pub enum BufferSlot<'b> {
    /// The caller's buffer, already cleared.
    Supplied(&'b mut CharBuffer),
    /// Allocated for this call.
    Fresh(CharBuffer),
}

impl<'b> BufferSlot<'b> {
    /// Clear `buffer` if there is one, else allocate `capacity`.
    pub fn acquire(buffer: Option<&'b mut CharBuffer>, capacity: usize) -> Self {
        match buffer {
            Some(buffer) => {
                buffer.clear();
                BufferSlot::Supplied(buffer)
            }
            None => BufferSlot::Fresh(CharBuffer::with_capacity(capacity)),
        }
    }

    pub fn get_mut(&mut self) -> &mut CharBuffer {
        match self {
            BufferSlot::Supplied(buffer) => buffer,
            BufferSlot::Fresh(buffer) => buffer,
        }
    }

    pub fn into_cow(self) -> Cow<'b, CharBuffer> {
        match self {
            BufferSlot::Supplied(buffer) => Cow::Borrowed(buffer),
            BufferSlot::Fresh(buffer) => Cow::Owned(buffer),
        }
    }
}

/// Stock [`LineFormatter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicLineFormatter {
    config: FormatterConfig,
}

/// Shared stock formatter, used wherever no formatter is given.
pub static DEFAULT: BasicLineFormatter = BasicLineFormatter::new();

impl BasicLineFormatter {
    pub const fn new() -> Self {
        Self::with_config(FormatterConfig::new())
    }

    pub const fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Buffer for the header path: the caller's, cleared, or a new one of the
    /// configured default capacity.
    pub fn init_buffer<'b>(&self, buffer: Option<&'b mut CharBuffer>) -> BufferSlot<'b> {
        BufferSlot::acquire(buffer, self.config.default_capacity)
    }

    /// Room for a formatted version, sized for `HTTP/1.1`.
    pub fn estimate_protocol_version_len(&self, version: &ProtocolVersion) -> usize {
        version.protocol.len() + 4
    }

    fn estimate_request_line_len(&self, line: &RequestLine) -> usize {
        line.method.len() + 1 + line.uri.len() + 1 + self.estimate_protocol_version_len(&line.protocol_version)
    }

    fn estimate_status_line_len(&self, line: &StatusLine) -> usize {
        // version, space, three digits, space
        let len = self.estimate_protocol_version_len(&line.protocol_version) + 1 + 3 + 1;
        len + line.reason_phrase.as_ref().map_or(0, String::len)
    }

    /// Write a request line into `buffer`, which the caller has emptied.
    pub fn do_format_request_line(&self, buffer: &mut CharBuffer, line: &RequestLine) {
        buffer.ensure_capacity(self.estimate_request_line_len(line));

        buffer.append(&line.method);
        buffer.push(' ');
        buffer.append(&line.uri);
        buffer.push(' ');
        self.append_protocol_version(buffer, &line.protocol_version);
    }

    /// Write a status line into `buffer`, which the caller has emptied.
    pub fn do_format_status_line(&self, buffer: &mut CharBuffer, line: &StatusLine) {
        buffer.ensure_capacity(self.estimate_status_line_len(line));

        self.append_protocol_version(buffer, &line.protocol_version);
        buffer.push(' ');
        buffer.append_int(line.status_code);
        buffer.push(' ');
        if let Some(reason) = &line.reason_phrase {
            buffer.append(reason);
        }
    }

    /// Write a header line into `buffer`, which the caller has emptied.
    pub fn do_format_header(&self, buffer: &mut CharBuffer, header: &dyn NameValuePair) {
        let name = header.name();
        let value = header.value();
        buffer.ensure_capacity(name.len() + 2 + value.map_or(0, str::len));

        buffer.append(name);
        buffer.append(": ");
        if let Some(value) = value {
            buffer.append(value);
        }
    }
}

impl LineFormatter for BasicLineFormatter {
    fn append_protocol_version(&self, buffer: &mut CharBuffer, version: &ProtocolVersion) {
        buffer.ensure_capacity(self.estimate_protocol_version_len(version));

        buffer.append(&version.protocol);
        buffer.push('/');
        buffer.append_int(version.major);
        buffer.push('.');
        buffer.append_int(version.minor);
    }

    fn format_protocol_version<'b>(
        &self,
        buffer: Option<&'b mut CharBuffer>,
        version: &ProtocolVersion,
    ) -> Cow<'b, CharBuffer> {
        let mut slot = BufferSlot::acquire(buffer, self.estimate_protocol_version_len(version));
        self.append_protocol_version(slot.get_mut(), version);
        slot.into_cow()
    }

    fn format_request_line<'b>(
        &self,
        buffer: Option<&'b mut CharBuffer>,
        line: &RequestLine,
    ) -> Cow<'b, CharBuffer> {
        let mut slot = BufferSlot::acquire(buffer, self.estimate_request_line_len(line));
        self.do_format_request_line(slot.get_mut(), line);
        slot.into_cow()
    }

    fn format_status_line<'b>(
        &self,
        buffer: Option<&'b mut CharBuffer>,
        line: &StatusLine,
    ) -> Cow<'b, CharBuffer> {
        let mut slot = BufferSlot::acquire(buffer, self.estimate_status_line_len(line));
        self.do_format_status_line(slot.get_mut(), line);
        slot.into_cow()
    }

    fn format_header<'b>(&self, buffer: Option<&'b mut CharBuffer>, header: &'b Header) -> Cow<'b, CharBuffer> {
        match header {
            Header::Formatted(formatted) => {
                trace!(name = formatted.name(), "reusing pre-rendered header line");
                Cow::Borrowed(formatted.buffer())
            }
            Header::Plain(plain) => {
                let mut slot = self.init_buffer(buffer);
                self.do_format_header(slot.get_mut(), plain);
                slot.into_cow()
            }
        }
    }
}

fn into_string(line: Cow<'_, CharBuffer>) -> String {
    match line {
        Cow::Owned(buffer) => buffer.into_string(),
        Cow::Borrowed(buffer) => buffer.as_str().to_string(),
    }
}

/// Format a protocol version with `formatter`, or [`DEFAULT`] when `None`.
pub fn format_protocol_version(version: &ProtocolVersion, formatter: Option<&dyn LineFormatter>) -> String {
    let formatter = formatter.unwrap_or(&DEFAULT);
    into_string(formatter.format_protocol_version(None, version))
}

/// Format a request line with `formatter`, or [`DEFAULT`] when `None`.
pub fn format_request_line(line: &RequestLine, formatter: Option<&dyn LineFormatter>) -> String {
    let formatter = formatter.unwrap_or(&DEFAULT);
    into_string(formatter.format_request_line(None, line))
}

/// Format a status line with `formatter`, or [`DEFAULT`] when `None`.
pub fn format_status_line(line: &StatusLine, formatter: Option<&dyn LineFormatter>) -> String {
    let formatter = formatter.unwrap_or(&DEFAULT);
    into_string(formatter.format_status_line(None, line))
}

/// Format a header with `formatter`, or [`DEFAULT`] when `None`.
pub fn format_header(header: &Header, formatter: Option<&dyn LineFormatter>) -> String {
    let formatter = formatter.unwrap_or(&DEFAULT);
    into_string(formatter.format_header(None, header))
}
