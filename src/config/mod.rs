//! Configuration module
//!
//! File-based defaults for a validation run. CLI flags override whatever
//! is loaded here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::scenarios::ScenarioParams;

/// Validation run configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Vendor protocol name or alias
    pub vendor: String,

    /// Management endpoint base URL (not needed for the simulated vendor)
    pub endpoint: Option<String>,

    /// Target interface name for the interface suite
    pub interface: Option<String>,

    /// VLAN used by the add/remove cycles
    pub vlan_to_set: u16,

    /// Per-scenario deadline for interface scenarios, in seconds
    pub command_timeout_secs: u64,

    /// Per-scenario deadline for enumeration scenarios, in milliseconds
    pub retrieval_timeout_ms: u64,

    /// Fixed wait between convergence checks, in milliseconds
    pub poll_interval_ms: u64,

    /// Pause between scenarios, in milliseconds
    pub settle_ms: u64,

    /// Report metadata
    pub report: ReportConfig,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            vendor: "simulated".to_string(),
            endpoint: None,
            interface: None,
            vlan_to_set: 1001,
            command_timeout_secs: 120,
            retrieval_timeout_ms: 1000,
            poll_interval_ms: 250,
            settle_ms: 2000,
            report: ReportConfig::default(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Self = if path
            .as_ref()
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(config)
    }

    /// Save configuration to a YAML or JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if path
            .as_ref()
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Translate into the parameters the scenario driver consumes
    pub fn scenario_params(&self) -> ScenarioParams {
        ScenarioParams {
            interface: self.interface.clone().unwrap_or_default(),
            vlan_to_set: self.vlan_to_set,
            command_timeout: Duration::from_secs(self.command_timeout_secs),
            retrieval_timeout: Duration::from_millis(self.retrieval_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            settle: Duration::from_millis(self.settle_ms),
        }
    }
}

/// Static report metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report title
    pub title: String,

    /// Owning team identifier
    pub team: String,

    /// Tracking project ids attached to the report
    pub project_ids: Vec<u32>,

    /// Free-text description of what the run validates
    pub description: String,

    /// Name of the system the run executes on
    pub system_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Network Switch Validation".to_string(),
            team: "network-qa".to_string(),
            project_ids: vec![15337],
            description: "Validates switch interface enumeration and VLAN/admin-state mutations"
                .to_string(),
            system_name: "Unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.vendor, "simulated");
        assert_eq!(config.vlan_to_set, 1001);
        assert_eq!(config.command_timeout_secs, 120);
        assert_eq!(config.poll_interval_ms, 250);
    }

    #[test]
    fn scenario_params_conversion() {
        let mut config = ValidatorConfig::default();
        config.interface = Some("Ethernet1".to_string());

        let params = config.scenario_params();
        assert_eq!(params.interface, "Ethernet1");
        assert_eq!(params.command_timeout, Duration::from_secs(120));
        assert_eq!(params.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = ValidatorConfig::default();
        config.vendor = "nexus".to_string();
        config.endpoint = Some("http://10.0.0.1:8080".to_string());
        config.save(&path).unwrap();

        let loaded = ValidatorConfig::load(&path).unwrap();
        assert_eq!(loaded.vendor, "nexus");
        assert_eq!(loaded.endpoint.as_deref(), Some("http://10.0.0.1:8080"));
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = ValidatorConfig::default();
        config.save(&path).unwrap();

        let loaded = ValidatorConfig::load(&path).unwrap();
        assert_eq!(loaded.report.title, "Network Switch Validation");
    }
}
