use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::transport::TransportError;

/// Deadline and cancellation shared by every attempt of one logical call.
///
/// The retry loop does not reset the deadline between attempts: once it has
/// passed, each remaining attempt fails immediately with
/// [`TransportError::DeadlineExceeded`].
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
}

impl CallContext {
    /// No deadline, not cancellable. Attempts are still bounded by the HTTP timeout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }

    /// Run one attempt under this context.
    pub(crate) async fn guard<F, T>(&self, attempt: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(TransportError::DeadlineExceeded);
        }

        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, attempt)
                    .await
                    .unwrap_or(Err(TransportError::DeadlineExceeded)),
                None => attempt.await,
            }
        };

        match &self.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(TransportError::Cancelled),
                res = bounded => res,
            },
            None => bounded.await,
        }
    }
}
