//! Switch interface state and mutation types

use serde::{Deserialize, Serialize};
use std::fmt;

/// IEEE 802.1Q VLAN identifier (valid range 1-4094)
pub type VlanId = u16;

/// Administratively configured state of an interface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    Up,
    Down,
    Unknown,
}

impl AdminState {
    pub fn is_up(self) -> bool {
        matches!(self, AdminState::Up)
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminState::Up => write!(f, "Up"),
            AdminState::Down => write!(f, "Down"),
            AdminState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Operational state of an interface, distinct from its admin state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperState {
    Up,
    Down,
    Unknown,
}

impl fmt::Display for OperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperState::Up => write!(f, "Up"),
            OperState::Down => write!(f, "Down"),
            OperState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Observed state of a single switch interface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterfaceState {
    /// Stable row key on the device
    pub key: String,
    /// Human-facing interface name, e.g. "Ethernet1"
    pub name: String,
    pub admin_state: AdminState,
    pub oper_state: OperState,
    /// VLANs the interface is currently a member of
    pub vlans: Vec<VlanId>,
}

impl InterfaceState {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            admin_state: AdminState::Unknown,
            oper_state: OperState::Unknown,
            vlans: Vec::new(),
        }
    }

    pub fn with_admin_state(mut self, state: AdminState) -> Self {
        self.admin_state = state;
        self
    }

    pub fn with_oper_state(mut self, state: OperState) -> Self {
        self.oper_state = state;
        self
    }

    pub fn with_vlans(mut self, vlans: Vec<VlanId>) -> Self {
        self.vlans = vlans;
        self
    }

    pub fn has_vlan(&self, vlan: VlanId) -> bool {
        self.vlans.contains(&vlan)
    }
}

/// A VLAN known to the switch
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VlanInfo {
    pub id: VlanId,
    pub name: String,
}

impl VlanInfo {
    pub fn new(id: VlanId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A single mutation to apply to an interface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceChange {
    AddVlan(VlanId),
    RemoveVlan(VlanId),
    SetAdminState(AdminState),
}

impl InterfaceChange {
    /// Whether an observed interface state already reflects this change.
    ///
    /// Admin Down is confirmed by "not Up": some devices report a
    /// transitional state instead of a clean Down.
    pub fn is_satisfied_by(&self, state: &InterfaceState) -> bool {
        match self {
            InterfaceChange::AddVlan(vlan) => state.has_vlan(*vlan),
            InterfaceChange::RemoveVlan(vlan) => !state.has_vlan(*vlan),
            InterfaceChange::SetAdminState(AdminState::Up) => state.admin_state.is_up(),
            InterfaceChange::SetAdminState(AdminState::Down) => !state.admin_state.is_up(),
            InterfaceChange::SetAdminState(AdminState::Unknown) => {
                state.admin_state == AdminState::Unknown
            }
        }
    }
}

impl fmt::Display for InterfaceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceChange::AddVlan(vlan) => write!(f, "AddVlan({vlan})"),
            InterfaceChange::RemoveVlan(vlan) => write!(f, "RemoveVlan({vlan})"),
            InterfaceChange::SetAdminState(state) => write!(f, "SetAdminState({state})"),
        }
    }
}

/// Batch of interface changes pushed as one unit
#[derive(Clone, Debug, Default)]
pub struct InterfaceSettings {
    changes: Vec<InterfaceChange>,
}

impl InterfaceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vlan(mut self, vlan: VlanId) -> Self {
        self.changes.push(InterfaceChange::AddVlan(vlan));
        self
    }

    pub fn remove_vlan(mut self, vlan: VlanId) -> Self {
        self.changes.push(InterfaceChange::RemoveVlan(vlan));
        self
    }

    pub fn set_admin_state(mut self, state: AdminState) -> Self {
        self.changes.push(InterfaceChange::SetAdminState(state));
        self
    }

    pub fn changes(&self) -> &[InterfaceChange] {
        &self.changes
    }

    /// Whether an observed state reflects every change in the batch.
    pub fn is_satisfied_by(&self, state: &InterfaceState) -> bool {
        self.changes.iter().all(|c| c.is_satisfied_by(state))
    }

    /// Dotted description used in failure messages,
    /// e.g. "RemoveVlan(1001).SetAdminState(Down)".
    pub fn describe(&self) -> String {
        self.changes
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface() -> InterfaceState {
        InterfaceState::new("1", "Ethernet1")
            .with_admin_state(AdminState::Up)
            .with_oper_state(OperState::Up)
            .with_vlans(vec![1, 1001])
    }

    #[test]
    fn change_satisfaction() {
        let state = iface();
        assert!(InterfaceChange::AddVlan(1001).is_satisfied_by(&state));
        assert!(!InterfaceChange::RemoveVlan(1001).is_satisfied_by(&state));
        assert!(InterfaceChange::SetAdminState(AdminState::Up).is_satisfied_by(&state));
        assert!(!InterfaceChange::SetAdminState(AdminState::Down).is_satisfied_by(&state));
    }

    #[test]
    fn admin_down_satisfied_by_not_up() {
        let state = iface().with_admin_state(AdminState::Unknown);
        assert!(InterfaceChange::SetAdminState(AdminState::Down).is_satisfied_by(&state));
    }

    #[test]
    fn settings_batch() {
        let settings = InterfaceSettings::new()
            .remove_vlan(1001)
            .set_admin_state(AdminState::Down);
        assert_eq!(settings.changes().len(), 2);
        assert_eq!(settings.describe(), "RemoveVlan(1001).SetAdminState(Down)");

        let state = iface();
        assert!(!settings.is_satisfied_by(&state));

        let cleaned = iface()
            .with_admin_state(AdminState::Down)
            .with_vlans(vec![1]);
        assert!(settings.is_satisfied_by(&cleaned));
    }

    #[test]
    fn change_display() {
        assert_eq!(InterfaceChange::AddVlan(1001).to_string(), "AddVlan(1001)");
        assert_eq!(
            InterfaceChange::SetAdminState(AdminState::Down).to_string(),
            "SetAdminState(Down)"
        );
    }
}
