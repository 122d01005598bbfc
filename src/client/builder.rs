use crate::auth::Credentials;
use crate::client::core::ApiClient;
use crate::hooks::{HookChain, HttpHook};
use crate::router::DOMAIN;
use crate::transport::{env_parse, HttpTransport, Transport, TransportConfig};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Attempts per call when neither the builder nor `WUJIE_MAX_RETRIES` say otherwise.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Builder for [`ApiClient`].
///
/// Explicit settings win over environment variables, which win over defaults:
/// - `WUJIE_BASE_URL` (default: the production gateway)
/// - `WUJIE_MAX_RETRIES` (default 3)
/// - `WUJIE_HTTP_TIMEOUT_SECS`, `WUJIE_HTTP_POOL_MAX_IDLE_PER_HOST`,
///   `WUJIE_HTTP_POOL_IDLE_TIMEOUT_SECS`, `WUJIE_PROXY_URL` (see [`TransportConfig`])
pub struct ClientBuilder {
    credentials: Option<Credentials>,
    base_url: Option<String>,
    max_retries: Option<u32>,
    timeout: Option<Duration>,
    transport_config: Option<TransportConfig>,
    transport: Option<Arc<dyn Transport>>,
    hooks: Vec<Arc<dyn HttpHook>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            credentials: None,
            base_url: None,
            max_retries: None,
            timeout: None,
            transport_config: None,
            transport: None,
            hooks: Vec::new(),
        }
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the gateway, e.g. to point at a mock server in tests.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Attempts per call. Zero is treated as one.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n.max(1));
        self
    }

    /// Per-attempt HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = Some(config);
        self
    }

    /// Replace the HTTP transport entirely. Transport settings are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Register a hook. Hooks run after request signing, in registration order.
    pub fn hook<H: HttpHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let credentials = match self.credentials {
            Some(c) => c,
            None => Credentials::from_env()?,
        };
        let credentials = Arc::new(credentials);

        let base_url = self
            .base_url
            .or_else(|| std::env::var("WUJIE_BASE_URL").ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DOMAIN.to_string());
        let base_url = validate_base_url(&base_url)?;

        let max_retries = self
            .max_retries
            .or_else(|| env_parse::<u32>("WUJIE_MAX_RETRIES"))
            .unwrap_or(DEFAULT_MAX_RETRIES)
            .max(1);

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => {
                let mut config = self.transport_config.unwrap_or_else(TransportConfig::from_env);
                if let Some(timeout) = self.timeout {
                    config.timeout = timeout;
                }
                Arc::new(HttpTransport::new(&config)?)
            }
        };

        let mut hooks = HookChain::new();
        hooks.push(credentials.clone());
        for hook in self.hooks {
            hooks.push(hook);
        }

        Ok(ApiClient {
            base_url,
            transport,
            hooks,
            credentials,
            max_retries,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let ctx = || {
        ErrorContext::new()
            .with_field("base_url")
            .with_origin("client_builder")
    };
    let url = Url::parse(trimmed).map_err(|e| {
        Error::setup(format!("invalid base url `{}`: {}", raw, e), ctx())
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::setup(
            format!("base url must be http or https, got `{}`", url.scheme()),
            ctx(),
        ));
    }
    if url.host_str().is_none() {
        return Err(Error::setup(
            format!("base url `{}` has no host", raw),
            ctx(),
        ));
    }
    Ok(trimmed.to_string())
}
