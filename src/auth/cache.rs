//! Single-slot TTL cache for the authorization token.

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// How long a computed token is reused before it is signed again.
pub const DEFAULT_SIGNATURE_TTL: Duration = Duration::from_secs(4 * 60);

#[derive(Debug)]
struct CachedToken {
    value: String,
    expires_at: SystemTime,
}

impl CachedToken {
    fn is_live(&self, now: SystemTime) -> bool {
        now < self.expires_at
    }
}

/// Holds at most one token with a fixed time-to-live.
///
/// Reads and writes are lock-free. Two callers that miss at the same time may
/// both compute a token; the last store wins and either token is valid.
#[derive(Debug)]
pub struct SignatureCache {
    slot: ArcSwapOption<CachedToken>,
    ttl: Duration,
}

impl SignatureCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: ArcSwapOption::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached token if one exists and has not expired at `now`.
    pub fn get(&self, now: SystemTime) -> Option<String> {
        self.slot
            .load_full()
            .filter(|token| token.is_live(now))
            .map(|token| token.value.clone())
    }

    /// Replace the slot with `value`, expiring `ttl` after `now`.
    pub fn store(&self, value: String, now: SystemTime) {
        let expires_at = now + self.ttl;
        self.slot
            .store(Some(Arc::new(CachedToken { value, expires_at })));
    }

    /// Return the live token or compute, store and return a fresh one.
    pub fn get_or_try_insert_with<F, E>(&self, now: SystemTime, compute: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        if let Some(token) = self.get(now) {
            return Ok(token);
        }
        let token = compute()?;
        self.store(token.clone(), now);
        Ok(token)
    }

    pub fn expires_at(&self) -> Option<SystemTime> {
        self.slot.load_full().map(|token| token.expires_at)
    }

    pub fn invalidate(&self) {
        self.slot.store(None);
    }
}

impl Default for SignatureCache {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNATURE_TTL)
    }
}
