//! Shared fixtures: a deterministic test key, a scripted transport, a
//! recording hook and a log capture.
#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, OnceLock};
use tracing_subscriber::fmt::MakeWriter;
use wujie_sdk::transport::TRACE_ID_HEADER;
use wujie_sdk::{
    ApiClient, ApiResponse, Credentials, Error, ErrorContext, HttpHook, OutboundRequest,
    Transport, TransportError,
};

pub const TEST_APP_ID: &str = "test-app";

pub fn test_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        RsaPrivateKey::new(&mut rng, 1024).unwrap()
    })
}

pub fn test_key_b64() -> String {
    STANDARD.encode(test_key().to_pkcs8_der().unwrap().as_bytes())
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_APP_ID, &test_key_b64()).unwrap()
}

/// One scripted outcome for a single attempt.
#[derive(Debug, Clone)]
pub enum Step {
    /// Respond with this status, body and optional `TRACE_ID`.
    Reply(u16, &'static str, Option<&'static str>),
    /// Fail before any response exists.
    Fail(&'static str),
    /// Never complete.
    Hang,
}

pub fn ok(body: &'static str) -> Step {
    Step::Reply(200, body, None)
}

pub fn status(code: u16, trace: &'static str) -> Step {
    Step::Reply(code, "", Some(trace))
}

/// What the transport observed for one attempt.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: reqwest::Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// In-memory transport that plays back `Step`s in order.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    seen: Mutex<Vec<Seen>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: &OutboundRequest,
        body: Option<Bytes>,
    ) -> Result<ApiResponse, TransportError> {
        self.seen.lock().unwrap().push(Seen {
            method: request.method.clone(),
            url: request.url.to_string(),
            headers: request.headers.clone(),
            body,
        });
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(code, body, trace)) => {
                let mut headers = HeaderMap::new();
                if let Some(t) = trace {
                    headers.insert(TRACE_ID_HEADER, HeaderValue::from_static(t));
                }
                Ok(ApiResponse::new(
                    StatusCode::from_u16(code).unwrap(),
                    headers,
                    Bytes::from_static(body.as_bytes()),
                ))
            }
            Some(Step::Fail(msg)) => Err(TransportError::Other(msg.to_string())),
            Some(Step::Hang) => std::future::pending().await,
            None => Err(TransportError::Other("script exhausted".to_string())),
        }
    }
}

pub fn scripted_client(transport: Arc<ScriptedTransport>, retries: u32) -> ApiClient {
    ApiClient::builder()
        .credentials(test_credentials())
        .base_url("http://gate.test/wj-open/v1")
        .max_retries(retries)
        .transport(transport)
        .build()
        .unwrap()
}

/// Hook that appends `before:<label>` / `after:<label>:<response?>:<error?>` to a shared log.
pub struct RecordingHook {
    pub label: &'static str,
    pub log: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<&'static str>,
}

impl RecordingHook {
    pub fn new(label: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label,
            log: log.clone(),
            fail_with: None,
        }
    }

    pub fn failing(label: &'static str, log: &Arc<Mutex<Vec<String>>>, msg: &'static str) -> Self {
        Self {
            label,
            log: log.clone(),
            fail_with: Some(msg),
        }
    }
}

#[async_trait]
impl HttpHook for RecordingHook {
    fn name(&self) -> &str {
        self.label
    }

    async fn before_request(&self, request: &mut OutboundRequest) -> wujie_sdk::Result<()> {
        let signed = request.headers.contains_key(reqwest::header::AUTHORIZATION);
        self.log
            .lock()
            .unwrap()
            .push(format!("before:{}:signed={}", self.label, signed));
        match self.fail_with {
            Some(msg) => Err(Error::setup(
                msg,
                ErrorContext::new().with_origin(self.label),
            )),
            None => Ok(()),
        }
    }

    async fn after_request(&self, response: Option<&ApiResponse>, error: Option<&Error>) {
        self.log.lock().unwrap().push(format!(
            "after:{}:{}:{}",
            self.label,
            response.map(|r| r.status.as_u16().to_string()).unwrap_or_else(|| "none".into()),
            error.map(|e| e.stage().as_str()).unwrap_or("none"),
        ));
    }
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(self.0.clone())
    }
}

/// Route DEBUG-and-above events on the current thread into a capture buffer.
pub fn capture_debug_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
