//! Transport seam between the request executor and the network.
//!
//! [`HttpTransport`] is the production implementation on top of `reqwest`.
//! Anything implementing [`Transport`] can stand in for it, which is how the
//! retry loop is exercised against scripted failures.

mod http;

pub(crate) use http::env_parse;
pub use http::{HttpTransport, TransportConfig};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Response header the remote service uses to echo its correlation id.
///
/// Sent as `TRACE_ID`; header names are case-insensitive and stored lowercase.
pub const TRACE_ID_HEADER: &str = "trace_id";

/// One outbound call: method, fully encoded URL, headers and optional JSON body.
///
/// The body is held as [`Bytes`] so every retry can resend the identical
/// bytes from the start.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    body: Option<Bytes>,
}

impl OutboundRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Option<Bytes>) -> Self {
        self.body = body;
        self
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Bytes to put on the wire for one attempt, rewound to the start.
    ///
    /// A POST without a caller body sends `{}`: the remote API rejects POSTs
    /// with an empty body.
    pub fn replay_body(&self) -> Option<Bytes> {
        match &self.body {
            Some(body) => Some(body.clone()),
            None if self.method == Method::POST => Some(Bytes::from_static(b"{}")),
            None => None,
        }
    }

    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// One-line summary of the request used by debug logging.
    pub fn summary(&self) -> String {
        format!(
            "Method:{}\tHost:{}\tPath:{}\tQuery:{}\tHeader info:{}",
            self.method,
            self.url.host_str().unwrap_or(""),
            self.url.path(),
            self.url.query().unwrap_or(""),
            header_summary(&self.headers),
        )
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Canonical reason phrase for the status code, empty when unknown.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Correlation id from the `TRACE_ID` header, if the service sent one.
    pub fn trace_id(&self) -> Option<String> {
        self.headers
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    pub fn summary(&self) -> String {
        format!(
            "StatusCode:{}\tHeader info:{}",
            self.status.as_u16(),
            header_summary(&self.headers)
        )
    }
}

/// Debug summary for a possibly absent response (transport failures have none).
pub fn response_summary(response: Option<&ApiResponse>) -> String {
    match response {
        Some(resp) => resp.summary(),
        None => "<no response>".to_string(),
    }
}

fn header_summary(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for name in headers.keys() {
        if *name == AUTHORIZATION {
            out.push_str("\tauthorization:<redacted>");
            continue;
        }
        let values: Vec<&str> = headers
            .get_all(name)
            .iter()
            .map(|v| v.to_str().unwrap_or("<binary>"))
            .collect();
        out.push('\t');
        out.push_str(name.as_str());
        out.push(':');
        out.push_str(&values.join(" "));
    }
    out
}

/// Sends one attempt of an [`OutboundRequest`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// `body` is the already rewound payload for this attempt.
    async fn send(
        &self,
        request: &OutboundRequest,
        body: Option<Bytes>,
    ) -> std::result::Result<ApiResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("call deadline exceeded")]
    DeadlineExceeded,

    #[error("call cancelled")]
    Cancelled,

    #[error("Transport error: {0}")]
    Other(String),
}
