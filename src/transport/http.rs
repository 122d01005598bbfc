use super::{ApiResponse, OutboundRequest, Transport, TransportError};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-attempt timeout.
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(200),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

impl TransportConfig {
    /// Defaults overridden by `WUJIE_HTTP_*` / `WUJIE_PROXY_URL` when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: env_parse::<u64>("WUJIE_HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pool_max_idle_per_host: env_parse("WUJIE_HTTP_POOL_MAX_IDLE_PER_HOST")
                .unwrap_or(defaults.pool_max_idle_per_host),
            pool_idle_timeout: env_parse::<u64>("WUJIE_HTTP_POOL_IDLE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.pool_idle_timeout),
            proxy_url: env::var("WUJIE_PROXY_URL").ok().filter(|s| !s.is_empty()),
        }
    }
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

/// `reqwest`-backed transport. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::setup(
                    format!("invalid proxy url: {}", e),
                    ErrorContext::new()
                        .with_field("proxy_url")
                        .with_origin("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::setup(
                format!("failed to build HTTP client: {}", e),
                ErrorContext::new().with_origin("http_transport"),
            )
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &OutboundRequest,
        body: Option<Bytes>,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        Ok(ApiResponse::new(status, headers, body))
    }
}
