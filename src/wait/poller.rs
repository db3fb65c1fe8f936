// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded polling until a remote condition holds.

use crate::constants::wait::DEFAULT_POLL_INTERVAL;
use crate::error::{ProviderError, Result};
use crate::wait::duration::{parse_poll_interval, Timeout};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How a wait ended, when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition held on the given check
    Converged { checks: u32 },
    /// No waiting was requested and the single check did not hold
    Pending,
    /// The deadline passed without the condition holding
    TimedOut { checks: u32, elapsed: Duration },
}

impl WaitOutcome {
    /// Turn a timeout into [`ProviderError::WaitTimeoutExceeded`]
    pub fn into_result(self, target: &str) -> Result<Self> {
        match self {
            WaitOutcome::TimedOut { checks, elapsed } => Err(ProviderError::WaitTimeoutExceeded {
                target: target.to_string(),
                elapsed,
                checks,
            }),
            outcome => Ok(outcome),
        }
    }
}

/// Repeatedly runs a check until it reports `true`, the timeout passes, the
/// check fails, or the wait is cancelled.
#[derive(Debug, Clone)]
pub struct Poller {
    timeout: Timeout,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(timeout: Timeout, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
            cancel: CancellationToken::new(),
        }
    }

    /// Build a poller from optional duration strings, falling back to the defaults
    pub fn from_settings(timeout: Option<&str>, poll_interval: Option<&str>) -> Result<Self> {
        let timeout = timeout.map(Timeout::parse).transpose()?.unwrap_or_default();
        let poll_interval = poll_interval
            .map(parse_poll_interval)
            .transpose()?
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        Ok(Self::new(timeout, poll_interval))
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn timeout(&self) -> Timeout {
        self.timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Block until `check` returns `Ok(true)`.
    ///
    /// Errors returned by `check` abort the wait on that same check. With
    /// [`Timeout::Immediate`] the check runs exactly once and the call never
    /// sleeps. Cancellation is observed between checks.
    pub async fn wait_until<F, Fut>(&self, what: &str, mut check: F) -> Result<WaitOutcome>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let Some(limit) = self.timeout.limit() else {
            let done = check().await?;
            debug!(what, done, "Checked once without waiting");
            return Ok(if done {
                WaitOutcome::Converged { checks: 1 }
            } else {
                WaitOutcome::Pending
            });
        };

        let start = Instant::now();
        let mut checks: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Err(ProviderError::Cancelled(what.to_string()));
            }

            checks = checks.saturating_add(1);
            if check().await? {
                info!(what, checks, elapsed = ?start.elapsed(), "Condition met");
                return Ok(WaitOutcome::Converged { checks });
            }

            let elapsed = start.elapsed();
            if elapsed >= limit {
                warn!(what, checks, ?elapsed, "Gave up waiting for condition");
                return Ok(WaitOutcome::TimedOut { checks, elapsed });
            }

            debug!(
                what,
                checks,
                "Condition not met yet, checking again in {:?}",
                self.poll_interval
            );

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    return Err(ProviderError::Cancelled(what.to_string()));
                }
                _ = sleep(self.poll_interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// A check that turns true on the given (1-based) call
    fn true_on(call: u32, counter: Arc<AtomicU32>) -> impl FnMut() -> std::future::Ready<Result<bool>> {
        move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(Ok(n >= call))
        }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_checks_once_when_false() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(Timeout::Immediate, secs(5));
        let start = Instant::now();

        let outcome = poller
            .wait_until("test", true_on(u32::MAX, counter.clone()))
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Pending);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_checks_once_when_true() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(Timeout::Immediate, secs(5));

        let outcome = poller
            .wait_until("test", true_on(1, counter.clone()))
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Converged { checks: 1 });
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_converges_on_third_check() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(Timeout::After(secs(30)), secs(5));
        let start = Instant::now();

        let outcome = poller
            .wait_until("test", true_on(3, counter.clone()))
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Converged { checks: 3 });
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        let elapsed = start.elapsed();
        assert!(elapsed >= secs(10) && elapsed < secs(11), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_within_check_budget() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(Timeout::After(secs(30)), secs(5));
        let start = Instant::now();

        let outcome = poller
            .wait_until("test", true_on(u32::MAX, counter.clone()))
            .await
            .unwrap();

        let checks = counter.load(Ordering::SeqCst);
        match outcome {
            WaitOutcome::TimedOut { checks: reported, elapsed } => {
                assert_eq!(reported, checks);
                assert!(elapsed >= secs(30));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        // ceil(30 / 5) + 1
        assert!(checks <= 7, "performed {} checks", checks);
        assert!(start.elapsed() >= secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_uneven_interval_respects_check_budget() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(Timeout::After(secs(30)), secs(7));

        let outcome = poller
            .wait_until("test", true_on(u32::MAX, counter.clone()))
            .await
            .unwrap();

        assert!(matches!(outcome, WaitOutcome::TimedOut { .. }));
        // ceil(30 / 7) + 1
        assert!(counter.load(Ordering::SeqCst) <= 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_error_aborts_immediately() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(Timeout::After(secs(30)), secs(5));
        let calls = counter.clone();

        let result = poller
            .wait_until("test", move || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n == 2 {
                        Err(ProviderError::KubeconfigError("unreachable".to_string()))
                    } else {
                        Ok(false)
                    }
                }
            })
            .await;

        assert!(matches!(result, Err(ProviderError::KubeconfigError(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_timeout_still_checks() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(Timeout::Unbounded, secs(1));
        let start = Instant::now();

        let outcome = poller
            .wait_until("test", true_on(2, counter.clone()))
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Converged { checks: 2 });
        let elapsed = start.elapsed();
        assert!(elapsed >= secs(1) && elapsed < secs(2), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_timeout_is_capped_at_one_week() {
        let counter = Arc::new(AtomicU32::new(0));
        let day = secs(24 * 60 * 60);
        let poller = Poller::new(Timeout::Unbounded, day);

        let outcome = poller
            .wait_until("test", true_on(u32::MAX, counter.clone()))
            .await
            .unwrap();

        match outcome {
            WaitOutcome::TimedOut { checks, elapsed } => {
                assert_eq!(checks, 8);
                assert!(elapsed >= day * 7);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_sleep() {
        let counter = Arc::new(AtomicU32::new(0));
        let token = CancellationToken::new();
        let poller = Poller::new(Timeout::After(secs(60)), secs(10)).with_cancellation(token.clone());
        let start = Instant::now();

        tokio::spawn(async move {
            sleep(secs(3)).await;
            token.cancel();
        });

        let result = poller
            .wait_until("test", true_on(u32::MAX, counter.clone()))
            .await;

        assert!(matches!(result, Err(ProviderError::Cancelled(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() < secs(10));
    }

    #[test]
    fn test_timeout_outcome_maps_to_error() {
        let outcome = WaitOutcome::TimedOut {
            checks: 3,
            elapsed: secs(10),
        };
        let err = outcome.into_result("default/web").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::WaitTimeoutExceeded { checks: 3, .. }
        ));
        assert!(err.to_string().contains("default/web"));

        assert_eq!(
            WaitOutcome::Pending.into_result("default/web").unwrap(),
            WaitOutcome::Pending
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_nanosecond_interval_under_unbounded_timeout() {
        let counter = Arc::new(AtomicU32::new(0));
        let poller = Poller::from_settings(Some("-1s"), Some("1ns")).unwrap();

        let outcome = poller
            .wait_until("default/web", true_on(5, counter.clone()))
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Converged { checks: 5 });
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_saturated_check_count_is_reported() {
        let err = WaitOutcome::TimedOut {
            checks: u32::MAX,
            elapsed: secs(7 * 24 * 60 * 60),
        }
        .into_result("default/web")
        .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::WaitTimeoutExceeded { checks: u32::MAX, .. }
        ));
    }

    #[test]
    fn test_from_settings_defaults() {
        let poller = Poller::from_settings(None, None).unwrap();
        assert_eq!(poller.timeout(), Timeout::After(secs(30)));
        assert_eq!(poller.poll_interval(), secs(5));

        let poller = Poller::from_settings(Some("-1s"), Some("2s")).unwrap();
        assert_eq!(poller.timeout(), Timeout::Unbounded);
        assert_eq!(poller.poll_interval(), secs(2));

        assert!(Poller::from_settings(Some("soon"), None).is_err());
    }
}
