//! Growable text buffer the formatter writes into.
//!
//! # Design
//! `CharBuffer` is a thin wrapper over `String` that only exposes the
//! operations a line writer needs: append, clear and reserve. Clearing keeps
//! the allocation, so a caller that formats many lines can hand the same
//! buffer back in every time and pay for growth once.

use std::fmt::{self, Write};

/// Capacity of a buffer allocated for a single header or line.
pub const DEFAULT_CAPACITY: usize = 64;

/// Append-only, capacity-reservable text buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharBuffer {
    inner: String,
}

impl CharBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: String::with_capacity(capacity),
        }
    }

    /// Truncate to empty. The allocation is kept.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Make room for at least `additional` more bytes. Never shrinks.
    pub fn ensure_capacity(&mut self, additional: usize) {
        self.inner.reserve(additional);
    }

    pub fn append(&mut self, s: &str) {
        self.inner.push_str(s);
    }

    pub fn push(&mut self, c: char) {
        self.inner.push(c);
    }

    /// Append the decimal form of `n`, sign included.
    pub fn append_int(&mut self, n: i32) {
        // Writing into a String cannot fail.
        let _ = write!(self.inner, "{n}");
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn into_string(self) -> String {
        self.inner
    }
}

impl Default for CharBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl fmt::Write for CharBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}

impl AsRef<str> for CharBuffer {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl From<String> for CharBuffer {
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl From<&str> for CharBuffer {
    fn from(s: &str) -> Self {
        Self { inner: s.to_string() }
    }
}

impl From<CharBuffer> for String {
    fn from(buffer: CharBuffer) -> Self {
        buffer.inner
    }
}
