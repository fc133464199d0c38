//! Simulated switch
//!
//! In-memory device with configurable propagation latency: a mutation is
//! accepted immediately but becomes visible to reads only after the
//! latency elapses, which is exactly the behavior the convergence polling
//! exists for. A "stuck" mode accepts mutations that never materialize.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{DeviceController, DeviceError, DeviceResult};
use crate::models::{AdminState, InterfaceChange, InterfaceState, OperState, VlanInfo};

#[derive(Debug)]
struct PendingChange {
    key: String,
    change: InterfaceChange,
    due: Instant,
}

#[derive(Debug)]
struct SimState {
    interfaces: Vec<InterfaceState>,
    vlans: Vec<VlanInfo>,
    pending: Vec<PendingChange>,
}

/// In-memory switch for offline runs and tests
#[derive(Debug)]
pub struct SimulatedSwitch {
    state: Mutex<SimState>,
    latency: Duration,
    jitter: Duration,
    stuck: bool,
}

impl SimulatedSwitch {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState {
                interfaces: Vec::new(),
                vlans: Vec::new(),
                pending: Vec::new(),
            }),
            latency: Duration::ZERO,
            jitter: Duration::ZERO,
            stuck: false,
        }
    }

    /// Small two-port fixture with realistic propagation latency
    pub fn with_defaults() -> Self {
        Self::new()
            .with_interface(
                InterfaceState::new("1", "Ethernet1")
                    .with_admin_state(AdminState::Up)
                    .with_oper_state(OperState::Up)
                    .with_vlans(vec![1, 1001]),
            )
            .with_interface(
                InterfaceState::new("2", "Ethernet2")
                    .with_admin_state(AdminState::Down)
                    .with_oper_state(OperState::Down)
                    .with_vlans(vec![1]),
            )
            .with_vlan(1, "default")
            .with_vlan(1001, "qa-conformance")
            .with_latency(Duration::from_millis(300))
            .with_jitter(Duration::from_millis(150))
    }

    pub fn with_interface(self, interface: InterfaceState) -> Self {
        self.state
            .lock()
            .expect("sim lock poisoned")
            .interfaces
            .push(interface);
        self
    }

    pub fn with_vlan(self, id: u16, name: impl Into<String>) -> Self {
        self.state
            .lock()
            .expect("sim lock poisoned")
            .vlans
            .push(VlanInfo::new(id, name));
        self
    }

    /// How long a mutation takes to become visible to reads
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Random extra delay added on top of the base latency
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Accept mutations but never let them take effect
    pub fn stuck(mut self) -> Self {
        self.stuck = true;
        self
    }

    fn propagation_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.latency;
        }
        let extra = rand::rng().random_range(0..=self.jitter.as_millis() as u64);
        self.latency + Duration::from_millis(extra)
    }

    /// Fold every pending change whose due time has passed into the
    /// visible interface state.
    fn settle(state: &mut SimState) {
        let now = Instant::now();
        let due: Vec<PendingChange> = {
            let mut kept = Vec::new();
            let mut ready = Vec::new();
            for pending in state.pending.drain(..) {
                if pending.due <= now {
                    ready.push(pending);
                } else {
                    kept.push(pending);
                }
            }
            state.pending = kept;
            ready
        };

        for pending in due {
            if let Some(iface) = state.interfaces.iter_mut().find(|i| i.key == pending.key) {
                match pending.change {
                    InterfaceChange::AddVlan(vlan) => {
                        if !iface.vlans.contains(&vlan) {
                            iface.vlans.push(vlan);
                        }
                    }
                    InterfaceChange::RemoveVlan(vlan) => {
                        iface.vlans.retain(|v| *v != vlan);
                    }
                    InterfaceChange::SetAdminState(admin) => {
                        iface.admin_state = admin;
                        // Operational state follows admin state here; link
                        // faults are not simulated.
                        iface.oper_state = match admin {
                            AdminState::Up => OperState::Up,
                            AdminState::Down => OperState::Down,
                            AdminState::Unknown => OperState::Unknown,
                        };
                    }
                }
            }
        }
    }
}

impl Default for SimulatedSwitch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceController for SimulatedSwitch {
    async fn list_interfaces(&self) -> DeviceResult<Vec<InterfaceState>> {
        let mut state = self.state.lock().expect("sim lock poisoned");
        Self::settle(&mut state);
        Ok(state.interfaces.clone())
    }

    async fn list_vlans(&self) -> DeviceResult<Vec<VlanInfo>> {
        Ok(self.state.lock().expect("sim lock poisoned").vlans.clone())
    }

    async fn read_interface(&self, key: &str) -> DeviceResult<InterfaceState> {
        let mut state = self.state.lock().expect("sim lock poisoned");
        Self::settle(&mut state);
        state
            .interfaces
            .iter()
            .find(|i| i.key == key)
            .cloned()
            .ok_or_else(|| DeviceError::InterfaceNotFound(key.to_string()))
    }

    async fn apply(&self, key: &str, changes: &[InterfaceChange]) -> DeviceResult<()> {
        let mut state = self.state.lock().expect("sim lock poisoned");
        if !state.interfaces.iter().any(|i| i.key == key) {
            return Err(DeviceError::InterfaceNotFound(key.to_string()));
        }
        if self.stuck {
            // Accepted, silently dropped: the caller's poll will time out.
            return Ok(());
        }
        let due = Instant::now() + self.propagation_delay();
        for change in changes {
            state.pending.push(PendingChange {
                key: key.to_string(),
                change: *change,
                due,
            });
        }
        Ok(())
    }
}
