//! Structured values that open an HTTP/1.x message.
//!
//! # Design
//! Plain owned data, built by whoever sits upstream (a request builder or a
//! response parser) and dropped once the line has been written. Numeric
//! fields are signed and unchecked: out-of-range values render as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `<protocol>/<major>.<minor>`, e.g. `HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub protocol: String,
    pub major: i32,
    pub minor: i32,
}

impl ProtocolVersion {
    pub const HTTP: &'static str = "HTTP";

    pub fn new(protocol: &str, major: i32, minor: i32) -> Self {
        Self {
            protocol: protocol.to_string(),
            major,
            minor,
        }
    }

    pub fn http(major: i32, minor: i32) -> Self {
        Self::new(Self::HTTP, major, minor)
    }

    pub fn http_1_0() -> Self {
        Self::http(1, 0)
    }

    pub fn http_1_1() -> Self {
        Self::http(1, 1)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format_protocol_version(self, None))
    }
}

/// First line of a request: method, target URI, protocol version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLine {
    pub method: String,
    pub uri: String,
    pub protocol_version: ProtocolVersion,
}

impl RequestLine {
    pub fn new(method: &str, uri: &str, protocol_version: ProtocolVersion) -> Self {
        Self {
            method: method.to_string(),
            uri: uri.to_string(),
            protocol_version,
        }
    }
}

/// First line of a response: protocol version, status code, reason phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub protocol_version: ProtocolVersion,
    pub status_code: i32,
    #[serde(default)]
    pub reason_phrase: Option<String>,
}

impl StatusLine {
    pub fn new(protocol_version: ProtocolVersion, status_code: i32, reason_phrase: Option<&str>) -> Self {
        Self {
            protocol_version,
            status_code,
            reason_phrase: reason_phrase.map(str::to_string),
        }
    }
}
