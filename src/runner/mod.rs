//! Scenario execution
//!
//! Wraps one named scenario with timing, error capture, and conversion
//! into a [`TestCaseReport`]. Scenarios never raise: every failure mode
//! ends up as a Failure record in the report.
//!
//! One overall deadline is shared across all of a scenario's steps — each
//! convergence poll gets the remaining budget as its timeout, so a slow
//! early step shrinks the window for later ones instead of stacking
//! per-step timeouts past the scenario bound.

use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info};

use crate::models::{TestCaseReport, DURATION_NOT_MEASURED};
use crate::poll::ConvergencePoller;
use crate::utils::Timer;

/// Why a scenario step could not complete
#[derive(Error, Debug)]
pub enum StepError {
    /// A mutation was issued but the expected state never became
    /// observable within the scenario budget.
    #[error("Unable to '{0}'")]
    Timeout(String),

    /// A precondition or read check failed. The elapsed time up to the
    /// check is still a valid measurement.
    #[error("{0}")]
    Check(String),

    /// Anything raised while talking to the device.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<crate::device::DeviceError> for StepError {
    fn from(err: crate::device::DeviceError) -> Self {
        StepError::Unexpected(err.into())
    }
}

/// Per-scenario deadline and polling parameters, passed into the body
#[derive(Clone, Copy, Debug)]
pub struct ScenarioContext {
    started: Instant,
    budget: Duration,
    poll_interval: Duration,
}

impl ScenarioContext {
    /// Budget left before the scenario deadline
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Poll until `predicate` reports convergence, bounded by the
    /// remaining scenario budget. A timeout becomes a step failure named
    /// after `action`, e.g. "AddVlan(1001)".
    pub async fn confirm<F, Fut>(
        &self,
        action: impl Into<String>,
        predicate: F,
    ) -> Result<(), StepError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<bool>>,
    {
        let poller = ConvergencePoller::new(self.poll_interval, self.remaining());
        let outcome = poller.wait_until(predicate).await?;
        if outcome.converged {
            Ok(())
        } else {
            Err(StepError::Timeout(action.into()))
        }
    }
}

/// Runs scenario bodies and records their outcome
#[derive(Clone, Copy, Debug)]
pub struct ScenarioRunner {
    budget: Duration,
    poll_interval: Duration,
}

impl ScenarioRunner {
    pub fn new(budget: Duration, poll_interval: Duration) -> Self {
        Self {
            budget,
            poll_interval,
        }
    }

    /// Execute `body` and convert its result into a report record.
    ///
    /// Mapping: Ok within budget → Success with measured duration;
    /// Ok past budget → Failure "Took longer than Xs"; step timeout →
    /// Failure with the sentinel duration; check failure → Failure with
    /// the measured duration; unexpected error → logged, then Failure
    /// with the sentinel duration.
    pub async fn run<F, Fut>(&self, name: &str, body: F) -> TestCaseReport
    where
        F: FnOnce(ScenarioContext) -> Fut,
        Fut: Future<Output = Result<(), StepError>>,
    {
        info!("Running scenario '{name}'");

        let ctx = ScenarioContext {
            started: Instant::now(),
            budget: self.budget,
            poll_interval: self.poll_interval,
        };
        let timer = Timer::start(name);

        let report = match body(ctx).await {
            Ok(()) => {
                let elapsed = timer.elapsed();
                if elapsed > self.budget {
                    // Final guard for non-polled work; polls themselves
                    // cannot exceed the shared deadline.
                    TestCaseReport::failure(
                        name,
                        format!("Took longer than {}s", self.budget.as_secs_f64()),
                        DURATION_NOT_MEASURED,
                    )
                } else {
                    TestCaseReport::success(name, elapsed.as_secs_f64() * 1000.0)
                }
            }
            Err(err @ StepError::Timeout(_)) => {
                TestCaseReport::failure(name, err.to_string(), DURATION_NOT_MEASURED)
            }
            Err(StepError::Check(message)) => {
                TestCaseReport::failure(name, message, timer.elapsed_ms() as f64)
            }
            Err(StepError::Unexpected(err)) => {
                error!("Scenario '{name}' raised: {err:#}");
                TestCaseReport::failure(
                    name,
                    format!("Unexpected error: {err}, see log"),
                    DURATION_NOT_MEASURED,
                )
            }
        };

        info!("  {report}");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use tokio::time::sleep;

    fn runner(budget_ms: u64) -> ScenarioRunner {
        ScenarioRunner::new(
            Duration::from_millis(budget_ms),
            Duration::from_millis(10),
        )
    }

    #[tokio::test]
    async fn success_is_measured() {
        let report = runner(1000)
            .run("noop", |_ctx| async {
                sleep(Duration::from_millis(5)).await;
                Ok(())
            })
            .await;

        assert!(report.outcome.is_success());
        assert!(report.message.is_empty());
        assert!(report.is_measured());
        assert!(report.duration_ms >= 5.0);
    }

    #[tokio::test]
    async fn step_timeout_maps_to_sentinel_failure() {
        let report = runner(1000)
            .run("vlan", |_ctx| async {
                Err(StepError::Timeout("AddVlan(1001)".to_string()))
            })
            .await;

        assert_eq!(report.outcome, Outcome::Failure);
        assert_eq!(report.message, "Unable to 'AddVlan(1001)'");
        assert!(!report.is_measured());
    }

    #[tokio::test]
    async fn check_failure_keeps_measured_duration() {
        let report = runner(1000)
            .run("enumerate", |_ctx| async {
                sleep(Duration::from_millis(5)).await;
                Err(StepError::Check("No interfaces found".to_string()))
            })
            .await;

        assert_eq!(report.outcome, Outcome::Failure);
        assert_eq!(report.message, "No interfaces found");
        assert!(report.is_measured());
    }

    #[tokio::test]
    async fn unexpected_error_never_escapes() {
        let report = runner(1000)
            .run("broken", |_ctx| async {
                Err(StepError::Unexpected(anyhow::anyhow!("connection reset")))
            })
            .await;

        assert_eq!(report.outcome, Outcome::Failure);
        assert!(report.message.contains("connection reset"));
        assert!(!report.is_measured());
    }

    #[tokio::test]
    async fn ceiling_breach_without_polls() {
        let report = runner(10)
            .run("slow", |_ctx| async {
                sleep(Duration::from_millis(40)).await;
                Ok(())
            })
            .await;

        assert_eq!(report.outcome, Outcome::Failure);
        assert!(report.message.contains("Took longer than"));
    }

    #[tokio::test]
    async fn confirm_is_bounded_by_remaining_budget() {
        let report = runner(50)
            .run("never", |ctx| async move {
                ctx.confirm("AddVlan(1001)", || async { Ok(false) }).await
            })
            .await;

        assert_eq!(report.outcome, Outcome::Failure);
        assert_eq!(report.message, "Unable to 'AddVlan(1001)'");
    }

    #[tokio::test]
    async fn confirm_succeeds_when_predicate_converges() {
        let report = runner(1000)
            .run("eventually", |ctx| async move {
                let start = Instant::now();
                ctx.confirm("SetAdminState(Up)", move || {
                    let ready = start.elapsed() >= Duration::from_millis(20);
                    async move { Ok(ready) }
                })
                .await
            })
            .await;

        assert!(report.outcome.is_success());
    }
}
