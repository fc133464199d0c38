//! Switch-level enumeration scenarios

use tracing::info;

use crate::device::DeviceController;
use crate::models::{AdminState, OperState};
use crate::runner::{ScenarioContext, StepError};

/// Enumerate interfaces and validate that every row is usable: a key, a
/// name, and known admin/operational states.
pub async fn retrieve_interfaces(
    device: &dyn DeviceController,
    _ctx: ScenarioContext,
) -> Result<(), StepError> {
    let interfaces = device.list_interfaces().await?;

    if interfaces.is_empty() {
        return Err(StepError::Check("No interfaces found".to_string()));
    }

    for iface in &interfaces {
        if iface.key.trim().is_empty() {
            return Err(StepError::Check(
                "Some interface(s) have no key".to_string(),
            ));
        }
        if iface.name.trim().is_empty() {
            return Err(StepError::Check(format!(
                "Interface {} has no name",
                iface.key
            )));
        }
        if iface.oper_state == OperState::Unknown {
            return Err(StepError::Check(format!(
                "Interface {} has unknown operational status",
                iface.name
            )));
        }
        if iface.admin_state == AdminState::Unknown {
            return Err(StepError::Check(format!(
                "Interface {} has unknown admin status",
                iface.name
            )));
        }
    }

    info!("Found {} interfaces", interfaces.len());
    Ok(())
}

/// Enumerate VLANs and validate id and name of every entry.
pub async fn retrieve_vlans(
    device: &dyn DeviceController,
    _ctx: ScenarioContext,
) -> Result<(), StepError> {
    let vlans = device.list_vlans().await?;

    if vlans.is_empty() {
        return Err(StepError::Check("No VLANs found".to_string()));
    }

    for vlan in &vlans {
        if vlan.id < 1 {
            return Err(StepError::Check("Some VLAN(s) have ID < 1".to_string()));
        }
        if vlan.name.trim().is_empty() {
            return Err(StepError::Check(format!("VLAN {} has no name", vlan.id)));
        }
    }

    info!("Found {} VLANs", vlans.len());
    Ok(())
}
