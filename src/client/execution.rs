//! Request execution: signing hooks, bounded retries with body replay, post hooks.

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::core::ApiClient;
use super::types::CallContext;
use crate::transport::{response_summary, ApiResponse, OutboundRequest};
use crate::{Error, Result};

/// Client-side correlation id sent with every call.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Result of a single send. A non-2xx answer is kept next to its status
/// error so post-hooks can still see it.
enum Attempt {
    Success(ApiResponse),
    Failed(Option<ApiResponse>, Error),
}

impl ApiClient {
    /// Build, sign and send one logical call.
    ///
    /// `params` become the encoded query string. A POST with `body == None`
    /// sends `{}`.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<Bytes>,
        ctx: &CallContext,
    ) -> Result<ApiResponse> {
        let url = self.build_url(path, params)?;
        self.send(OutboundRequest::new(method, url).with_body(body), ctx)
            .await
    }

    /// Send a prepared request through the hook chain and the retry loop.
    ///
    /// Returns the first 2xx response, or the error of the last attempt once
    /// all attempts are spent. Transport failures and non-2xx statuses are
    /// retried alike; the response body is never inspected here.
    pub async fn send(&self, mut request: OutboundRequest, ctx: &CallContext) -> Result<ApiResponse> {
        let request_id = Uuid::new_v4().to_string();
        request.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            request.set_header(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        let span = info_span!(
            "wujie_call",
            request_id = %request_id,
            method = %request.method,
            path = request.url.path(),
        );
        self.run_attempts(request, ctx).instrument(span).await
    }

    async fn run_attempts(&self, mut request: OutboundRequest, ctx: &CallContext) -> Result<ApiResponse> {
        self.hooks.run_before(&mut request).await?;

        let attempts = self.max_retries.max(1);
        let mut attempt = 1;
        let mut outcome = self.attempt(&request, ctx, attempt).await;
        while attempt < attempts {
            match &outcome {
                Attempt::Success(_) => break,
                Attempt::Failed(_, err) => {
                    warn!(attempt, max_attempts = attempts, error = %err, "attempt failed, retrying");
                }
            }
            attempt += 1;
            outcome = self.attempt(&request, ctx, attempt).await;
        }

        match outcome {
            Attempt::Success(resp) => {
                self.hooks.run_after(Some(&resp), None).await;
                Ok(resp)
            }
            Attempt::Failed(resp, err) => {
                self.hooks.run_after(resp.as_ref(), Some(&err)).await;
                info!(
                    attempts,
                    stage = err.stage().as_str(),
                    trace_id = err.trace_id().unwrap_or("-"),
                    "wujie call failed: {}",
                    err
                );
                Err(err)
            }
        }
    }

    /// One send with a freshly replayed body.
    async fn attempt(&self, request: &OutboundRequest, ctx: &CallContext, attempt: u32) -> Attempt {
        let body = request.replay_body();
        debug!(attempt, "[Req] {}", request.summary());

        match ctx.guard(self.transport.send(request, body)).await {
            Ok(resp) => {
                debug!(attempt, "[Resp] {}", resp.summary());
                if resp.is_success() {
                    return Attempt::Success(resp);
                }
                let err = Error::Status {
                    status: resp.status.as_u16(),
                    status_text: resp.status_text().to_string(),
                    trace_id: resp.trace_id(),
                };
                Attempt::Failed(Some(resp), err)
            }
            Err(source) => {
                debug!(attempt, "[Resp] {}", response_summary(None));
                Attempt::Failed(
                    None,
                    Error::Transport {
                        attempts: attempt,
                        source,
                    },
                )
            }
        }
    }
}
