//! Wayfare Provider Gate
//! Copyright (c) 2026 Mamy Ratsimbazafy
//! Licensed and distributed under either of
//!   * MIT license (license terms at the root of the package or at http://opensource.org/licenses/MIT).
//!   * Apache v2 license (license terms at the root of the package or at http://www.apache.org/licenses/LICENSE-2.0).
//! at your option. This file may not be copied, modified, or distributed except according to those terms.

//! wayfare-internals/provider-gate
//! Admission control for calls to external travel-data providers.
//!
//! A gate bounds how many calls are in flight at once (semaphore) and,
//! optionally, how many are started per second (token bucket). A call admitted
//! through the gate runs exactly once: a provider failure is terminal for the
//! request, the gate never retries on the caller's behalf.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::sync::{Mutex, Notify};
use tokio::time;

/// Custom error for the provider gate
#[derive(Debug, Error)]
pub enum ProviderGateError {
    #[error("provider call failed: {0}")]
    CallFailed(#[source] anyhow::Error),
    #[error("gate is closed")]
    GateClosed,
}

/// Rate limiting mode
#[derive(Clone, Debug)]
enum RateLimit {
    ConcurrencyOnly,
    Qps {
        limit: u64,
        tokens: Arc<AtomicU64>,
        last_refill: Arc<Mutex<Instant>>,
        refill_interval: Duration,
        notify: Arc<tokio::sync::Notify>,
    },
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::ConcurrencyOnly
    }
}

/// An async semaphore for limiting concurrent operations
#[derive(Clone, Debug)]
struct AsyncSemaphore {
    inner: Arc<Semaphore>,
}

impl AsyncSemaphore {
    fn new(permits: usize) -> Self {
        Self {
            inner: Arc::new(Semaphore::new(permits)),
        }
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, tokio::sync::AcquireError> {
        self.inner.acquire().await
    }
}

/// An admission gate in front of an external service.
///
/// # Examples
///
/// Concurrency only (4 concurrent requests):
/// ```ignore
/// let gate = ProviderGate::with_concurrency_limit(4);
/// ```
///
/// QPS limit (4 requests per second):
/// ```ignore
/// let gate = ProviderGate::with_qps_limit(4);
/// ```
#[derive(Clone, Debug)]
pub struct ProviderGate {
    semaphore: AsyncSemaphore,
    rate_limit: RateLimit,
}

impl Default for ProviderGate {
    fn default() -> Self {
        Self {
            semaphore: AsyncSemaphore::new(4),
            rate_limit: RateLimit::ConcurrencyOnly,
        }
    }
}

impl ProviderGate {
    /// Create a new gate with max concurrent requests
    pub fn with_concurrency_limit(max_concurrent: u64) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: AsyncSemaphore::new(max_concurrent as usize),
            ..Default::default()
        }
    }

    /// Create a new gate with a QPS limit
    pub fn with_qps_limit(qps_limit: u64) -> Self {
        let qps_limit = qps_limit.max(1);
        Self {
            semaphore: AsyncSemaphore::new(qps_limit as usize),
            rate_limit: RateLimit::Qps {
                limit: qps_limit,
                tokens: Arc::new(AtomicU64::new(qps_limit)),
                last_refill: Arc::new(Mutex::new(Instant::now())),
                refill_interval: Duration::from_secs(1),
                notify: Arc::new(Notify::new()),
            },
        }
    }

    /// Refill tokens based on elapsed time
    async fn refill_tokens(&self) {
        match &self.rate_limit {
            RateLimit::ConcurrencyOnly => {}
            RateLimit::Qps {
                limit,
                tokens,
                last_refill,
                refill_interval,
                notify,
                ..
            } => {
                let mut last = last_refill.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(*last);
                if elapsed >= *refill_interval {
                    let new_tokens = (elapsed.as_secs_f64() * *limit as f64) as u64;
                    if new_tokens > 0 {
                        let _ = tokens.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                            Some(cur.saturating_add(new_tokens).min(*limit))
                        });
                        // Wake up any waiters that token is now available
                        notify.notify_waiters();
                    }
                    *last = now;
                }
            }
        }
    }

    // Acquire a token for rate limiting using async notification
    async fn acquire_token(&self) {
        match &self.rate_limit {
            RateLimit::ConcurrencyOnly => {}
            RateLimit::Qps { tokens, notify, .. } => loop {
                self.refill_tokens().await;
                let available = tokens.load(Ordering::SeqCst);
                if available > 0 {
                    if tokens
                        .compare_exchange(
                            available,
                            available - 1,
                            Ordering::SeqCst,
                            Ordering::SeqCst,
                        )
                        .is_ok()
                    {
                        return;
                    }
                } else {
                    let _ = time::timeout(Duration::from_millis(100), notify.notified()).await;
                }
            },
        }
    }

    /// Execute a provider call once, under admission control.
    ///
    /// The function `f` should return `Result<T, anyhow::Error>`. An `Err` is
    /// reported as `ProviderGateError::CallFailed`; nothing is re-attempted.
    pub async fn admit<T, F, Fut>(&self, f: F) -> Result<T, ProviderGateError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, anyhow::Error>> + Send,
    {
        // Acquire a permit (for concurrency control)
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderGateError::GateClosed)?;

        // Acquire a token (for QPS rate limiting)
        self.acquire_token().await;

        f().await.map_err(ProviderGateError::CallFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn admit_runs_once_and_returns_value() {
        let gate = ProviderGate::with_concurrency_limit(2);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_inner = Arc::clone(&calls);
        let out = gate
            .admit(move || async move {
                calls_inner.fetch_add(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(42)
            })
            .await
            .unwrap();
        assert_eq!(out, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn admit_does_not_retry_failures() {
        let gate = ProviderGate::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_inner = Arc::clone(&calls);
        let out: Result<(), _> = gate
            .admit(move || async move {
                calls_inner.fetch_add(1, Ordering::SeqCst);
                anyhow::bail!("provider down")
            })
            .await;
        assert!(matches!(out, Err(ProviderGateError::CallFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrency_limit_bounds_in_flight_calls() {
        let gate = ProviderGate::with_concurrency_limit(2);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let gate = gate.clone();
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                gate.admit(move || async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    time::sleep(Duration::from_millis(20)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, anyhow::Error>(())
                })
                .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
