//! Verify formatting against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file lists a structured input and the exact line it must
//! produce. Every case is checked twice: through a fresh buffer, and through
//! a reused buffer that still holds the previous case's output.

use httpline_core::{
    BasicHeader, CharBuffer, Header, LineFormatter, ProtocolVersion, RequestLine, StatusLine, DEFAULT,
};
use serde::de::DeserializeOwned;

struct Case<T> {
    name: String,
    input: T,
    expected: String,
}

fn load<T: DeserializeOwned>(raw: &str) -> Vec<Case<T>> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|case| Case {
            name: case["name"].as_str().unwrap().to_string(),
            input: serde_json::from_value(case["input"].clone()).unwrap(),
            expected: case["expected"].as_str().unwrap().to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Protocol version
// ---------------------------------------------------------------------------

#[test]
fn protocol_version_test_vectors() {
    let cases: Vec<Case<ProtocolVersion>> = load(include_str!("../../test-vectors/protocol_version.json"));

    let mut reused = CharBuffer::new();
    for case in cases {
        let name = &case.name;
        let fresh = DEFAULT.format_protocol_version(None, &case.input);
        assert_eq!(fresh.as_str(), case.expected, "{name}: fresh buffer");

        let out = DEFAULT.format_protocol_version(Some(&mut reused), &case.input);
        assert_eq!(out.as_str(), case.expected, "{name}: reused buffer");
    }
}

// ---------------------------------------------------------------------------
// Request line
// ---------------------------------------------------------------------------

#[test]
fn request_line_test_vectors() {
    let cases: Vec<Case<RequestLine>> = load(include_str!("../../test-vectors/request_line.json"));

    let mut reused = CharBuffer::new();
    for case in cases {
        let name = &case.name;
        let fresh = DEFAULT.format_request_line(None, &case.input);
        assert_eq!(fresh.as_str(), case.expected, "{name}: fresh buffer");

        let out = DEFAULT.format_request_line(Some(&mut reused), &case.input);
        assert_eq!(out.as_str(), case.expected, "{name}: reused buffer");

        assert_eq!(httpline_core::format_request_line(&case.input, None), case.expected, "{name}: wrapper");
    }
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[test]
fn status_line_test_vectors() {
    let cases: Vec<Case<StatusLine>> = load(include_str!("../../test-vectors/status_line.json"));

    let mut reused = CharBuffer::new();
    for case in cases {
        let name = &case.name;
        let fresh = DEFAULT.format_status_line(None, &case.input);
        assert_eq!(fresh.as_str(), case.expected, "{name}: fresh buffer");
        assert_eq!(fresh.as_str().matches(' ').count() - spaces_in_reason(&case.input), 2, "{name}: separators");

        let out = DEFAULT.format_status_line(Some(&mut reused), &case.input);
        assert_eq!(out.as_str(), case.expected, "{name}: reused buffer");
    }
}

fn spaces_in_reason(line: &StatusLine) -> usize {
    line.reason_phrase.as_deref().map_or(0, |r| r.matches(' ').count())
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

#[test]
fn header_test_vectors() {
    let cases: Vec<Case<BasicHeader>> = load(include_str!("../../test-vectors/header.json"));

    let mut reused = CharBuffer::new();
    for case in cases {
        let name = &case.name;
        let header = Header::Plain(case.input);

        let fresh = DEFAULT.format_header(None, &header);
        assert_eq!(fresh.as_str(), case.expected, "{name}: fresh buffer");

        let out = DEFAULT.format_header(Some(&mut reused), &header);
        assert_eq!(out.as_str(), case.expected, "{name}: reused buffer");
    }
}
