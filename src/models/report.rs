//! Report models for validation runs
//!
//! Defines the per-scenario pass/fail record and the run report that
//! collects them in execution order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel duration for results whose timing is a lower bound only,
/// e.g. a step that timed out before a meaningful measurement existed.
/// Distinct from a legitimate 0ms duration.
pub const DURATION_NOT_MEASURED: f64 = -1.0;

/// Outcome of a single validation scenario
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn symbol(&self) -> &'static str {
        match self {
            Outcome::Success => "✓",
            Outcome::Failure => "✗",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "SUCCESS"),
            Outcome::Failure => write!(f, "FAILURE"),
        }
    }
}

/// Immutable record of one scenario execution.
///
/// A Failure always carries a non-empty message; a Success carries an
/// empty one. `duration_ms` is either the measured elapsed time or
/// [`DURATION_NOT_MEASURED`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCaseReport {
    pub name: String,
    pub outcome: Outcome,
    pub message: String,
    pub duration_ms: f64,
}

impl TestCaseReport {
    pub fn success(name: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Success,
            message: String::new(),
            duration_ms,
        }
    }

    pub fn failure(name: impl Into<String>, message: impl Into<String>, duration_ms: f64) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "failure reports need a message");
        Self {
            name: name.into(),
            outcome: Outcome::Failure,
            message,
            duration_ms,
        }
    }

    /// Whether the duration is a real measurement rather than the sentinel.
    pub fn is_measured(&self) -> bool {
        self.duration_ms >= 0.0
    }
}

impl fmt::Display for TestCaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.outcome.symbol(), self.name)?;
        if self.is_measured() {
            write!(f, " [{:.0}ms]", self.duration_ms)?;
        } else {
            write!(f, " [-]")?;
        }
        if !self.message.is_empty() {
            write!(f, " - {}", self.message)?;
        }
        Ok(())
    }
}

/// Static metadata describing what a report validates
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestInfo {
    pub name: String,
    pub team: String,
    pub project_ids: Vec<u32>,
    pub description: String,
}

impl TestInfo {
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        project_ids: Vec<u32>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            project_ids,
            description: description.into(),
        }
    }
}

/// Identifies the system the report was produced on
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestSystemInfo {
    pub name: String,
}

impl TestSystemInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Append-only report of a validation run.
///
/// Cases are kept in execution order; consumers must not reorder them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestReport {
    pub info: TestInfo,
    pub system: TestSystemInfo,
    pub generated_at: DateTime<Utc>,
    test_cases: Vec<TestCaseReport>,
}

impl TestReport {
    pub fn new(info: TestInfo, system: TestSystemInfo) -> Self {
        Self {
            info,
            system,
            generated_at: Utc::now(),
            test_cases: Vec::new(),
        }
    }

    /// Append a scenario result. No deduplication, no validation; the
    /// runner is responsible for the contents.
    pub fn append(&mut self, case: TestCaseReport) {
        self.test_cases.push(case);
    }

    pub fn cases(&self) -> &[TestCaseReport] {
        &self.test_cases
    }

    pub fn total(&self) -> usize {
        self.test_cases.len()
    }

    pub fn passed(&self) -> usize {
        self.test_cases
            .iter()
            .filter(|c| c.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn pass_rate(&self) -> f64 {
        if self.test_cases.is_empty() {
            0.0
        } else {
            (self.passed() as f64 / self.total() as f64) * 100.0
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", self.info.name, self.system.name)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for case in &self.test_cases {
            writeln!(f, "  {case}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Pass Rate: {:.1}%",
            self.total(),
            self.passed(),
            self.failed(),
            self.pass_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_empty_message() {
        let case = TestCaseReport::success("AddRemoveVlan", 125.0);
        assert!(case.outcome.is_success());
        assert!(case.message.is_empty());
        assert!(case.is_measured());
    }

    #[test]
    fn failure_keeps_message_and_sentinel() {
        let case =
            TestCaseReport::failure("AddRemoveVlan", "Unable to 'AddVlan(1001)'", DURATION_NOT_MEASURED);
        assert_eq!(case.outcome, Outcome::Failure);
        assert!(!case.message.is_empty());
        assert!(!case.is_measured());
    }

    #[test]
    fn sentinel_is_not_a_zero_duration() {
        let zero = TestCaseReport::success("fast", 0.0);
        assert!(zero.is_measured());
        assert!(zero.duration_ms != DURATION_NOT_MEASURED);
    }

    #[test]
    fn report_preserves_append_order() {
        let mut report = TestReport::new(
            TestInfo::new("Network Switch Validation", "qa", vec![1], "ordering"),
            TestSystemInfo::new("lab"),
        );
        report.append(TestCaseReport::success("a", 1.0));
        report.append(TestCaseReport::failure("b", "boom", DURATION_NOT_MEASURED));
        report.append(TestCaseReport::success("c", 3.0));

        let names: Vec<_> = report.cases().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = TestReport::new(
            TestInfo::new("Network Switch Validation", "qa", vec![], "json"),
            TestSystemInfo::new("lab"),
        );
        report.append(TestCaseReport::success("RetrieveVlans", 12.5));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"RetrieveVlans\""));
        assert!(json.contains("\"success\""));
    }
}
