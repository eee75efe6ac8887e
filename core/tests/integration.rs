//! Formatted heads against a live HTTP server.
//!
//! # Design
//! Starts the echo server on a random port. The raw-socket tests act as the
//! downstream wire writer: they format each line, add CRLF, and check that
//! the server parsed exactly what was written. The ureq tests act as the
//! adapter layer, turning a client library's response into a `StatusLine`
//! and headers and formatting those back into wire text.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};

use echo_server::Echo;
use httpline_core::{
    BasicHeader, CharBuffer, FormattedHeader, Header, LineFormatter, ProtocolVersion, RequestLine, StatusLine,
    DEFAULT,
};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            echo_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Write a request head built from formatted lines and return the raw
/// response split into head and body.
fn exchange(addr: SocketAddr, line: &RequestLine, headers: &[Header]) -> (String, String) {
    let mut buf = CharBuffer::new();
    let mut wire = String::new();

    wire.push_str(DEFAULT.format_request_line(Some(&mut buf), line).as_str());
    wire.push_str("\r\n");
    for header in headers {
        wire.push_str(DEFAULT.format_header(Some(&mut buf), header).as_str());
        wire.push_str("\r\n");
    }
    wire.push_str("\r\n");

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(wire.as_bytes()).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    let (head, body) = response.split_once("\r\n\r\n").expect("response has a head");
    (head.to_string(), body.to_string())
}

fn host(addr: SocketAddr) -> Header {
    Header::new("Host", Some(&addr.to_string()))
}

fn close() -> Header {
    Header::new("Connection", Some("close"))
}

fn header_value<'a>(echo: &'a Echo, name: &str) -> Option<&'a str> {
    echo.headers
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn server_parses_formatted_request_head() {
    let addr = start_server();
    let line = RequestLine::new("PUT", "/todos/1?draft=true", ProtocolVersion::http_1_1());
    let headers = [
        host(addr),
        Header::new("Accept", Some("*/*")),
        Header::new("X-Empty", None),
        close(),
    ];

    let (head, body) = exchange(addr, &line, &headers);

    let status = StatusLine::new(ProtocolVersion::http_1_1(), 200, Some("OK"));
    let expected_status = httpline_core::format_status_line(&status, None);
    assert_eq!(head.lines().next(), Some(expected_status.as_str()));

    let echo: Echo = serde_json::from_str(&body).unwrap();
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.uri, "/todos/1?draft=true");
    assert_eq!(echo.version, "HTTP/1.1");
    assert_eq!(header_value(&echo, "accept"), Some("*/*"));
    assert_eq!(header_value(&echo, "x-empty"), Some(""));
}

#[test]
fn server_reads_http_1_0_version_token() {
    let addr = start_server();
    let line = RequestLine::new("GET", "/", ProtocolVersion::http_1_0());

    let (_, body) = exchange(addr, &line, &[host(addr)]);

    let echo: Echo = serde_json::from_str(&body).unwrap();
    assert_eq!(echo.version, "HTTP/1.0");
}

#[test]
fn pre_rendered_header_is_sent_verbatim() {
    let addr = start_server();
    let token = Header::Formatted(FormattedHeader::prerender(
        &DEFAULT,
        BasicHeader::new("Authorization", Some("Bearer abc123")),
    ));
    let line = RequestLine::new("GET", "/me", ProtocolVersion::http_1_1());

    for _ in 0..2 {
        let (_, body) = exchange(addr, &line, &[host(addr), token.clone(), close()]);
        let echo: Echo = serde_json::from_str(&body).unwrap();
        assert_eq!(header_value(&echo, "authorization"), Some("Bearer abc123"));
    }
}

#[test]
fn status_line_matches_server_output() {
    let addr = start_server();
    let line = RequestLine::new("GET", "/status/404", ProtocolVersion::http_1_1());

    let (head, _) = exchange(addr, &line, &[host(addr), close()]);

    let status = StatusLine::new(ProtocolVersion::http_1_1(), 404, Some("Not Found"));
    assert_eq!(
        head.lines().next(),
        Some(DEFAULT.format_status_line(None, &status).as_str())
    );
}

// ---------------------------------------------------------------------------
// Adapting a client library's response
// ---------------------------------------------------------------------------

fn adapt_version(version: ureq::http::Version) -> ProtocolVersion {
    use ureq::http::Version;
    match version {
        Version::HTTP_09 => ProtocolVersion::http(0, 9),
        Version::HTTP_10 => ProtocolVersion::http_1_0(),
        Version::HTTP_2 => ProtocolVersion::http(2, 0),
        Version::HTTP_3 => ProtocolVersion::http(3, 0),
        _ => ProtocolVersion::http_1_1(),
    }
}

fn adapt_status_line<B>(response: &ureq::http::Response<B>) -> StatusLine {
    let status = response.status();
    StatusLine::new(
        adapt_version(response.version()),
        i32::from(status.as_u16()),
        status.canonical_reason(),
    )
}

fn adapt_headers<B>(response: &ureq::http::Response<B>) -> Vec<Header> {
    response
        .headers()
        .iter()
        .map(|(name, value)| Header::new(name.as_str(), value.to_str().ok()))
        .collect()
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

#[test]
fn adapted_ureq_response_formats_as_status_line() {
    let addr = start_server();

    let response = agent()
        .get(&format!("http://{addr}/status/503"))
        .call()
        .expect("HTTP transport error");

    let line = adapt_status_line(&response);
    assert_eq!(
        httpline_core::format_status_line(&line, None),
        "HTTP/1.1 503 Service Unavailable"
    );
}

#[test]
fn adapted_ureq_headers_format_as_header_lines() {
    let addr = start_server();

    let response = agent()
        .get(&format!("http://{addr}/"))
        .call()
        .expect("HTTP transport error");

    let lines: Vec<String> = adapt_headers(&response)
        .iter()
        .map(|h| httpline_core::format_header(h, None))
        .collect();
    assert!(
        lines.iter().any(|l| l == "content-type: application/json"),
        "got {lines:?}"
    );
}
