//! Before/after interceptors around every outbound call.
//!
//! The client always registers its [`Credentials`](crate::auth::Credentials)
//! first, so signing is the first pre-request hook. Further hooks (metrics,
//! auditing, custom headers) run after it in registration order.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::transport::{ApiResponse, OutboundRequest};
use crate::{Error, Result};

/// Interceptor invoked around each logical call.
///
/// `before_request` runs once before the first attempt and may mutate the
/// request; an error aborts the call before anything is sent.
/// `after_request` runs once after the last attempt. Either argument may be
/// absent: a transport failure has no response, a success has no error.
#[async_trait]
pub trait HttpHook: Send + Sync {
    /// Name used in error messages and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn before_request(&self, _request: &mut OutboundRequest) -> Result<()> {
        Ok(())
    }

    async fn after_request(&self, _response: Option<&ApiResponse>, _error: Option<&Error>) {}
}

/// Ordered list of hooks.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn HttpHook>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn with<H: HttpHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn push(&mut self, hook: Arc<dyn HttpHook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Run pre-request hooks in order, stopping at the first error.
    pub async fn run_before(&self, request: &mut OutboundRequest) -> Result<()> {
        for hook in &self.hooks {
            if let Err(err) = hook.before_request(request).await {
                debug!(hook = hook.name(), error = %err, "pre-request hook aborted call");
                return Err(Error::Hook {
                    hook: hook.name().to_string(),
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }

    /// Run post-request hooks in order. Nothing they do reaches the caller.
    pub async fn run_after(&self, response: Option<&ApiResponse>, error: Option<&Error>) {
        for hook in &self.hooks {
            hook.after_request(response, error).await;
        }
    }
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
