//! Validation scenarios
//!
//! Two suites mirroring the switch-level and interface-level validation
//! runs:
//!
//! ### General suite (1-2)
//! - Retrieving interfaces
//! - Retrieving VLANs
//!
//! ### Interface suite (3-7)
//! - TryAddRemoveVlan
//! - TryChangeSettings
//! - AddRemoveVlan
//! - GetSetAdminStates
//! - ChangeSettings
//!
//! Scenarios run strictly sequentially, one mutate+confirm step at a
//! time, with a settle pause between scenarios. Each scenario isolates
//! its own failures; the run always completes and emits a full report.

mod interface;
mod switch;

use std::fmt;
use std::time::Duration;
use tokio::time::sleep;

use crate::device::DeviceController;
use crate::models::{TestCaseReport, TestReport, VlanId};
use crate::runner::ScenarioRunner;

/// Scenario grouping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suite {
    /// Switch-level enumeration checks
    General,
    /// Mutation checks against one target interface
    Interface,
}

impl Suite {
    pub fn name(&self) -> &'static str {
        match self {
            Suite::General => "General",
            Suite::Interface => "Interface",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// All validation scenarios
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    RetrieveInterfaces,
    RetrieveVlans,
    TryAddRemoveVlan,
    TryChangeSettings,
    AddRemoveVlan,
    GetSetAdminStates,
    ChangeSettings,
}

impl Scenario {
    pub fn number(&self) -> u8 {
        match self {
            Scenario::RetrieveInterfaces => 1,
            Scenario::RetrieveVlans => 2,
            Scenario::TryAddRemoveVlan => 3,
            Scenario::TryChangeSettings => 4,
            Scenario::AddRemoveVlan => 5,
            Scenario::GetSetAdminStates => 6,
            Scenario::ChangeSettings => 7,
        }
    }

    /// Name as it appears in the report
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::RetrieveInterfaces => "Retrieving interfaces",
            Scenario::RetrieveVlans => "Retrieving VLANs",
            Scenario::TryAddRemoveVlan => "TryAddRemoveVlan",
            Scenario::TryChangeSettings => "TryChangeSettings",
            Scenario::AddRemoveVlan => "AddRemoveVlan",
            Scenario::GetSetAdminStates => "GetSetAdminStates",
            Scenario::ChangeSettings => "ChangeSettings",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::RetrieveInterfaces => "Enumerate interfaces and validate key fields",
            Scenario::RetrieveVlans => "Enumerate VLANs and validate id/name",
            Scenario::TryAddRemoveVlan => "Checked VLAN remove/add/remove cycle",
            Scenario::TryChangeSettings => "Checked batch settings push and revert",
            Scenario::AddRemoveVlan => "Raw VLAN remove/add/remove with convergence polls",
            Scenario::GetSetAdminStates => "Toggle admin state down/up/down with polls",
            Scenario::ChangeSettings => "Raw batch settings push with convergence polls",
        }
    }

    pub fn suite(&self) -> Suite {
        match self {
            Scenario::RetrieveInterfaces | Scenario::RetrieveVlans => Suite::General,
            _ => Suite::Interface,
        }
    }

    /// Whether the scenario polls raw reads and must not be served from a
    /// read cache.
    pub fn requires_fresh_reads(&self) -> bool {
        matches!(
            self,
            Scenario::AddRemoveVlan | Scenario::GetSetAdminStates | Scenario::ChangeSettings
        )
    }

    pub fn all() -> Vec<Scenario> {
        vec![
            Scenario::RetrieveInterfaces,
            Scenario::RetrieveVlans,
            Scenario::TryAddRemoveVlan,
            Scenario::TryChangeSettings,
            Scenario::AddRemoveVlan,
            Scenario::GetSetAdminStates,
            Scenario::ChangeSettings,
        ]
    }

    pub fn in_suite(suite: Suite) -> Vec<Scenario> {
        Self::all()
            .into_iter()
            .filter(|s| s.suite() == suite)
            .collect()
    }

    pub fn from_number(n: u8) -> Option<Scenario> {
        Self::all().into_iter().find(|s| s.number() == n)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}: {}", self.number(), self.name())
    }
}

/// Shared parameters for a validation run
#[derive(Clone, Debug)]
pub struct ScenarioParams {
    /// Target interface name for the interface suite
    pub interface: String,
    /// VLAN used for the add/remove cycles
    pub vlan_to_set: VlanId,
    /// Deadline for one interface scenario, shared across its steps
    pub command_timeout: Duration,
    /// Deadline for one enumeration scenario
    pub retrieval_timeout: Duration,
    /// Fixed wait between convergence checks
    pub poll_interval: Duration,
    /// Pause between scenarios
    pub settle: Duration,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            interface: String::new(),
            vlan_to_set: 1001,
            command_timeout: Duration::from_secs(120),
            retrieval_timeout: Duration::from_secs(1),
            poll_interval: Duration::from_millis(250),
            settle: Duration::from_secs(2),
        }
    }
}

/// Run one scenario against the device.
pub async fn run_scenario(
    device: &dyn DeviceController,
    scenario: Scenario,
    params: &ScenarioParams,
) -> TestCaseReport {
    let budget = match scenario.suite() {
        Suite::General => params.retrieval_timeout,
        Suite::Interface => params.command_timeout,
    };
    let runner = ScenarioRunner::new(budget, params.poll_interval);

    let uncached = scenario.requires_fresh_reads();
    if uncached {
        device.set_caching(false);
    }

    let name = scenario.name();
    let vlan = params.vlan_to_set;
    let target = params.interface.as_str();

    let report = match scenario {
        Scenario::RetrieveInterfaces => {
            runner
                .run(name, |ctx| switch::retrieve_interfaces(device, ctx))
                .await
        }
        Scenario::RetrieveVlans => {
            runner
                .run(name, |ctx| switch::retrieve_vlans(device, ctx))
                .await
        }
        Scenario::TryAddRemoveVlan => {
            runner
                .run(name, |ctx| {
                    interface::try_add_remove_vlan(device, ctx, target, vlan)
                })
                .await
        }
        Scenario::TryChangeSettings => {
            runner
                .run(name, |ctx| {
                    interface::try_change_settings(device, ctx, target, vlan)
                })
                .await
        }
        Scenario::AddRemoveVlan => {
            runner
                .run(name, |ctx| {
                    interface::add_remove_vlan(device, ctx, target, vlan)
                })
                .await
        }
        Scenario::GetSetAdminStates => {
            runner
                .run(name, |ctx| {
                    interface::get_set_admin_states(device, ctx, target)
                })
                .await
        }
        Scenario::ChangeSettings => {
            runner
                .run(name, |ctx| {
                    interface::change_settings(device, ctx, target, vlan)
                })
                .await
        }
    };

    if uncached {
        device.set_caching(true);
    }

    report
}

/// Run scenarios in order, appending each result to the report.
///
/// Strictly sequential; a settle pause separates consecutive scenarios so
/// one scenario's trailing device activity does not bleed into the next.
pub async fn run_suite(
    device: &dyn DeviceController,
    scenarios: &[Scenario],
    params: &ScenarioParams,
    report: &mut TestReport,
) {
    for (i, scenario) in scenarios.iter().enumerate() {
        if i > 0 && !params.settle.is_zero() {
            sleep(params.settle).await;
        }
        let case = run_scenario(device, *scenario, params).await;
        report.append(case);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SimulatedSwitch;
    use crate::models::{TestInfo, TestSystemInfo};

    #[test]
    fn scenario_numbering() {
        assert_eq!(Scenario::RetrieveInterfaces.number(), 1);
        assert_eq!(Scenario::ChangeSettings.number(), 7);
        assert_eq!(Scenario::from_number(5), Some(Scenario::AddRemoveVlan));
        assert_eq!(Scenario::from_number(8), None);
    }

    #[test]
    fn suites_partition_the_catalog() {
        assert_eq!(Scenario::in_suite(Suite::General).len(), 2);
        assert_eq!(Scenario::in_suite(Suite::Interface).len(), 5);
        assert_eq!(Scenario::all().len(), 7);
    }

    #[test]
    fn raw_scenarios_bypass_caching() {
        assert!(Scenario::AddRemoveVlan.requires_fresh_reads());
        assert!(!Scenario::TryAddRemoveVlan.requires_fresh_reads());
        assert!(!Scenario::RetrieveVlans.requires_fresh_reads());
    }

    #[tokio::test]
    async fn run_suite_always_completes() {
        // Empty device: every scenario fails, none aborts the run.
        let device = SimulatedSwitch::new();
        let params = ScenarioParams {
            command_timeout: Duration::from_millis(100),
            retrieval_timeout: Duration::from_millis(100),
            poll_interval: Duration::from_millis(10),
            settle: Duration::ZERO,
            ..Default::default()
        };
        let mut report = TestReport::new(
            TestInfo::new("Network Switch Validation", "qa", vec![], "isolation"),
            TestSystemInfo::new("test"),
        );

        run_suite(&device, &Scenario::all(), &params, &mut report).await;

        assert_eq!(report.total(), 7);
        assert_eq!(report.failed(), 7);
        for case in report.cases() {
            assert!(!case.message.is_empty());
        }
    }

    #[tokio::test]
    async fn report_order_matches_execution_order() {
        let device = SimulatedSwitch::with_defaults();
        let params = ScenarioParams {
            settle: Duration::ZERO,
            ..Default::default()
        };
        let scenarios = Scenario::in_suite(Suite::General);
        let mut report = TestReport::new(
            TestInfo::new("Network Switch Validation", "qa", vec![], "ordering"),
            TestSystemInfo::new("test"),
        );

        run_suite(&device, &scenarios, &params, &mut report).await;

        let names: Vec<_> = report.cases().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Retrieving interfaces", "Retrieving VLANs"]);
    }
}
