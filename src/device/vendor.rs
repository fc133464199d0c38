//! Supported switch vendors
//!
//! A closed set of vendor variants, selected once at startup from the
//! protocol name. Unknown protocols produce an explicit error instead of
//! an open-ended failure deep inside a scenario.

use std::fmt;

use super::{DeviceController, DeviceError, DeviceResult, RestSwitchClient, SimulatedSwitch};

/// Switch vendors this tool can validate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vendor {
    AperiChassis,
    CiscoNexus,
    AristaManager,
    /// In-memory switch, for offline runs and tests
    Simulated,
}

impl Vendor {
    /// Canonical protocol name as reported by the element inventory
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Vendor::AperiChassis => "Aperi Chassis",
            Vendor::CiscoNexus => "CISCO Nexus",
            Vendor::AristaManager => "Arista Manager",
            Vendor::Simulated => "Simulated",
        }
    }

    /// Path prefix of the vendor's management REST API
    pub fn api_prefix(&self) -> &'static str {
        match self {
            Vendor::AperiChassis => "/api/aperi/v1",
            Vendor::CiscoNexus => "/api/nxos/v1",
            Vendor::AristaManager => "/api/eos/v1",
            Vendor::Simulated => "",
        }
    }

    pub fn all() -> Vec<Vendor> {
        vec![
            Vendor::AperiChassis,
            Vendor::CiscoNexus,
            Vendor::AristaManager,
            Vendor::Simulated,
        ]
    }

    /// Parse from a protocol name or short alias
    pub fn from_protocol(s: &str) -> Option<Vendor> {
        match s.to_lowercase().as_str() {
            "aperi chassis" | "aperi" => Some(Vendor::AperiChassis),
            "cisco nexus" | "nexus" | "cisco" => Some(Vendor::CiscoNexus),
            "arista manager" | "arista" => Some(Vendor::AristaManager),
            "simulated" | "sim" => Some(Vendor::Simulated),
            _ => None,
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.protocol_name())
    }
}

/// Construct the controller for a vendor.
///
/// Real vendors need a management endpoint; the simulated switch does not.
pub fn connect(vendor: Vendor, endpoint: Option<&str>) -> DeviceResult<Box<dyn DeviceController>> {
    match vendor {
        Vendor::Simulated => Ok(Box::new(SimulatedSwitch::with_defaults())),
        vendor => {
            let endpoint = endpoint
                .ok_or_else(|| DeviceError::MissingEndpoint(vendor.protocol_name().to_string()))?;
            Ok(Box::new(RestSwitchClient::new(vendor, endpoint)?))
        }
    }
}

/// Construct a controller straight from a protocol name.
pub fn connect_protocol(
    protocol: &str,
    endpoint: Option<&str>,
) -> DeviceResult<Box<dyn DeviceController>> {
    let vendor = Vendor::from_protocol(protocol)
        .ok_or_else(|| DeviceError::UnsupportedProtocol(protocol.to_string()))?;
    connect(vendor, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_name_roundtrip() {
        for vendor in Vendor::all() {
            assert_eq!(Vendor::from_protocol(vendor.protocol_name()), Some(vendor));
        }
    }

    #[test]
    fn aliases() {
        assert_eq!(Vendor::from_protocol("nexus"), Some(Vendor::CiscoNexus));
        assert_eq!(Vendor::from_protocol("ARISTA"), Some(Vendor::AristaManager));
        assert_eq!(Vendor::from_protocol("sim"), Some(Vendor::Simulated));
        assert_eq!(Vendor::from_protocol("juniper"), None);
    }

    #[test]
    fn unsupported_protocol_is_explicit() {
        let err = connect_protocol("Juniper EX", None).unwrap_err();
        assert!(matches!(err, DeviceError::UnsupportedProtocol(_)));
        assert!(err.to_string().contains("Juniper EX"));
    }

    #[test]
    fn real_vendor_requires_endpoint() {
        let err = connect(Vendor::CiscoNexus, None).unwrap_err();
        assert!(matches!(err, DeviceError::MissingEndpoint(_)));
    }

    #[test]
    fn simulated_needs_no_endpoint() {
        assert!(connect(Vendor::Simulated, None).is_ok());
    }
}
