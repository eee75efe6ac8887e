//! Echo server for exercising formatted request heads against a real HTTP
//! parser.
//!
//! Every request is answered with a JSON description of the head the server
//! parsed: method, target, version and header fields in arrival order.
//! `/status/{code}` answers with that status code and the same body.

use axum::{
    extract::{Path, Request},
    http::StatusCode,
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

/// What the server saw in the request head.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub uri: String,
    pub version: String,
    pub headers: Vec<(String, String)>,
}

impl Echo {
    fn from_request(req: &Request) -> Self {
        let headers = req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        Self {
            method: req.method().as_str().to_string(),
            uri: req.uri().to_string(),
            version: format!("{:?}", req.version()),
            headers,
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", any(echo_with_status))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "echo server listening");
    }
    axum::serve(listener, app()).await
}

async fn echo(req: Request) -> Json<Echo> {
    let echo = Echo::from_request(&req);
    debug!(method = %echo.method, uri = %echo.uri, "echo");
    Json(echo)
}

async fn echo_with_status(Path(code): Path<u16>, req: Request) -> (StatusCode, Json<Echo>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    let echo = Echo::from_request(&req);
    debug!(method = %echo.method, uri = %echo.uri, status = status.as_u16(), "echo with status");
    (status, Json(echo))
}
