//! Bounded convergence polling
//!
//! Repeatedly evaluates a predicate at a fixed interval until it reports
//! true or a wall-clock deadline elapses. Used to confirm that a mutation
//! issued to a switch has become observable.

use anyhow::Result;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::trace;

/// Result of one polling call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOutcome {
    /// Whether the predicate became true before the deadline
    pub converged: bool,
    /// Wall-clock time spent polling
    pub elapsed: Duration,
}

/// Fixed-interval poller with a wall-clock timeout.
///
/// The interval sleep happens before the first check as well, so an
/// already-true condition is observed after one interval, not zero.
/// There is no retry budget distinct from the timeout.
#[derive(Clone, Copy, Debug)]
pub struct ConvergencePoller {
    interval: Duration,
    timeout: Duration,
}

impl ConvergencePoller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        debug_assert!(interval > Duration::ZERO, "poll interval must be positive");
        Self { interval, timeout }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll until `predicate` returns true or the timeout elapses.
    ///
    /// Returns within `timeout + interval` of being invoked. Predicate
    /// errors propagate to the caller instead of being swallowed.
    pub async fn wait_until<F, Fut>(&self, mut predicate: F) -> Result<PollOutcome>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let start = Instant::now();
        loop {
            sleep(self.interval).await;

            if predicate().await? {
                return Ok(PollOutcome {
                    converged: true,
                    elapsed: start.elapsed(),
                });
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                trace!("poll deadline reached after {}ms", elapsed.as_millis());
                return Ok(PollOutcome {
                    converged: false,
                    elapsed,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn poller(interval_ms: u64, timeout_ms: u64) -> ConvergencePoller {
        ConvergencePoller::new(
            Duration::from_millis(interval_ms),
            Duration::from_millis(timeout_ms),
        )
    }

    #[tokio::test]
    async fn already_true_takes_one_interval() {
        let outcome = poller(10, 1000).wait_until(|| async { Ok(true) }).await.unwrap();
        assert!(outcome.converged);
        assert!(outcome.elapsed >= Duration::from_millis(10));
        assert!(outcome.elapsed < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn converges_after_k_intervals() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let outcome = poller(10, 1000)
            .wait_until(move || {
                let counter = counter.clone();
                async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3) }
            })
            .await
            .unwrap();

        assert!(outcome.converged);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(outcome.elapsed >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn never_true_returns_once_at_deadline() {
        let start = Instant::now();
        let outcome = poller(10, 60).wait_until(|| async { Ok(false) }).await.unwrap();
        assert!(!outcome.converged);
        assert!(outcome.elapsed >= Duration::from_millis(60));
        // Bounded: timeout plus one interval, with scheduler slack.
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn zero_timeout_checks_exactly_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let outcome = poller(10, 0)
            .wait_until(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(false)
                }
            })
            .await
            .unwrap();

        assert!(!outcome.converged);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn predicate_error_propagates() {
        let result = poller(10, 1000)
            .wait_until(|| async { anyhow::bail!("read failed") })
            .await;
        assert!(result.is_err());
    }
}
