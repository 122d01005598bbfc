use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::auth::Credentials;
use crate::client::types::CallContext;
use crate::hooks::{HookChain, HttpHook};
use crate::transport::{ApiResponse, Transport};
use crate::{Error, ErrorContext, Result};

/// Signed client for the Wujie open platform.
///
/// Cheap to clone: the transport, credentials and signature cache are shared.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) hooks: HookChain,
    pub(crate) credentials: Arc<Credentials>,
    pub(crate) max_retries: u32,
}

impl ApiClient {
    pub fn builder() -> crate::client::ClientBuilder {
        crate::client::ClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn hooks(&self) -> &HookChain {
        &self.hooks
    }

    /// Attempts per call, at least 1.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Append a hook after the ones already registered. Signing stays first.
    pub fn add_hook(&mut self, hook: Arc<dyn HttpHook>) {
        self.hooks.push(hook);
    }

    /// Join `path` onto the base URL and append `params` as an encoded query.
    pub fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| {
            Error::setup(
                format!("invalid request url `{}`: {}", raw, e),
                ErrorContext::new()
                    .with_field("path")
                    .with_origin("request_builder"),
            )
        })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Signed GET with query parameters.
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        ctx: &CallContext,
    ) -> Result<ApiResponse> {
        self.execute(Method::GET, path, params, None, ctx).await
    }

    /// Signed POST with `body` serialized as JSON.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        ctx: &CallContext,
    ) -> Result<ApiResponse> {
        let bytes = Bytes::from(serde_json::to_vec(body)?);
        self.execute(Method::POST, path, &[], Some(bytes), ctx)
            .await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("hooks", &self.hooks)
            .field("credentials", &self.credentials)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
