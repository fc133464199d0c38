//! Device control layer
//!
//! A capability interface over switch management backends plus the closed
//! set of supported vendors. The scenarios only ever see
//! [`DeviceController`]; which backend sits behind it is decided once at
//! startup.

mod rest;
mod sim;
mod vendor;

pub use rest::RestSwitchClient;
pub use sim::SimulatedSwitch;
pub use vendor::{connect, connect_protocol, Vendor};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{InterfaceChange, InterfaceState, VlanInfo};

/// Device layer errors
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("The protocol '{0}' is not supported by this validation tool")]
    UnsupportedProtocol(String),

    #[error("Interface '{0}' not found on device")]
    InterfaceNotFound(String),

    #[error("Management endpoint required for vendor '{0}'")]
    MissingEndpoint(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Management endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Capability interface to a switch.
///
/// Reads report the device's current observable state; mutations are
/// fire-and-confirm — callers poll a read until the change is visible.
#[async_trait]
pub trait DeviceController: Send + Sync + std::fmt::Debug {
    /// Enumerate all interfaces with their current state.
    async fn list_interfaces(&self) -> DeviceResult<Vec<InterfaceState>>;

    /// Enumerate all VLANs known to the switch.
    async fn list_vlans(&self) -> DeviceResult<Vec<VlanInfo>>;

    /// Read the current state of one interface by row key.
    async fn read_interface(&self, key: &str) -> DeviceResult<InterfaceState>;

    /// Issue a batch of changes against one interface. Returns once the
    /// device accepted the request, not once the change converged.
    async fn apply(&self, key: &str, changes: &[InterfaceChange]) -> DeviceResult<()>;

    /// Toggle read caching. Backends without a cache ignore this.
    fn set_caching(&self, _enabled: bool) {}
}

/// Resolve an interface by display name.
pub async fn find_interface(
    device: &dyn DeviceController,
    name: &str,
) -> DeviceResult<InterfaceState> {
    let interfaces = device.list_interfaces().await?;
    interfaces
        .into_iter()
        .find(|i| i.name == name)
        .ok_or_else(|| DeviceError::InterfaceNotFound(name.to_string()))
}
