//! Header values.
//!
//! # Design
//! A header is either plain (a name and an optional value) or already
//! rendered. The rendered form carries the buffer it was rendered into, and
//! the formatter hands that buffer back untouched instead of writing the line
//! again. Headers read off the wire or rendered once and sent many times take
//! that path.

use serde::{Deserialize, Serialize};

use crate::buffer::CharBuffer;
use crate::formatter::LineFormatter;

/// Anything with a name and an optional value.
pub trait NameValuePair {
    fn name(&self) -> &str;
    fn value(&self) -> Option<&str>;
}

/// A header that still has to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicHeader {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl BasicHeader {
    pub fn new(name: &str, value: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }
}

impl NameValuePair for BasicHeader {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A header together with its rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedHeader {
    header: BasicHeader,
    buffer: CharBuffer,
}

impl FormattedHeader {
    /// Pair a header with a line rendered elsewhere. The buffer is trusted as
    /// given.
    pub fn new(header: BasicHeader, buffer: CharBuffer) -> Self {
        Self { header, buffer }
    }

    /// Render `header` once with `formatter` and keep the result.
    pub fn prerender(formatter: &dyn LineFormatter, header: BasicHeader) -> Self {
        let buffer = formatter
            .format_header(None, &Header::Plain(header.clone()))
            .into_owned();
        Self { header, buffer }
    }

    pub fn buffer(&self) -> &CharBuffer {
        &self.buffer
    }

    pub fn header(&self) -> &BasicHeader {
        &self.header
    }
}

impl NameValuePair for FormattedHeader {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn value(&self) -> Option<&str> {
        self.header.value.as_deref()
    }
}

/// A header as the formatter sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    Plain(BasicHeader),
    Formatted(FormattedHeader),
}

impl Header {
    pub fn new(name: &str, value: Option<&str>) -> Self {
        Header::Plain(BasicHeader::new(name, value))
    }
}

impl NameValuePair for Header {
    fn name(&self) -> &str {
        match self {
            Header::Plain(h) => h.name(),
            Header::Formatted(h) => h.name(),
        }
    }

    fn value(&self) -> Option<&str> {
        match self {
            Header::Plain(h) => h.value(),
            Header::Formatted(h) => h.value(),
        }
    }
}

impl From<BasicHeader> for Header {
    fn from(header: BasicHeader) -> Self {
        Header::Plain(header)
    }
}

impl From<FormattedHeader> for Header {
    fn from(header: FormattedHeader) -> Self {
        Header::Formatted(header)
    }
}
