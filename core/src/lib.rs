//! Text formatting for the head of an HTTP/1.x message.
//!
//! # Overview
//! Turns structured request lines, status lines, headers and protocol
//! versions into the exact text a wire writer emits, without the trailing
//! CRLF. Nothing here reads or writes sockets; the caller owns the I/O and
//! the line terminators.
//!
//! # Design
//! - `LineFormatter` is the contract; `BasicLineFormatter` implements it and
//!   `DEFAULT` is a shared, stateless instance.
//! - Each operation writes into a caller-supplied `CharBuffer` (cleared
//!   first, allocation kept) or a fresh one, and returns it as a `Cow`.
//! - A `Header::Formatted` value short-circuits formatting and hands back
//!   the buffer it was rendered into.
//! - The free functions `format_*` are one-shot conveniences returning
//!   `String`.

pub mod buffer;
pub mod config;
pub mod error;
pub mod formatter;
pub mod header;
pub mod types;

pub use buffer::CharBuffer;
pub use config::FormatterConfig;
pub use error::{require, FormatError};
pub use formatter::{
    format_header, format_protocol_version, format_request_line, format_status_line, BasicLineFormatter, BufferSlot,
    LineFormatter, DEFAULT,
};
pub use header::{BasicHeader, FormattedHeader, Header, NameValuePair};
pub use types::{ProtocolVersion, RequestLine, StatusLine};
