//! Interface mutation scenarios
//!
//! Each scenario is a sequence of mutate+confirm steps against one
//! target interface: issue a change, then poll the device until the
//! change is observable or the scenario budget runs out. A failed step
//! short-circuits the scenario; later steps (including reverts) are not
//! attempted, so a failure can leave the interface in the applied state.

use crate::device::DeviceController;
use crate::models::{AdminState, InterfaceChange, InterfaceSettings, InterfaceState, VlanId};
use crate::runner::{ScenarioContext, StepError};

/// Resolve the target interface by name.
async fn target(
    device: &dyn DeviceController,
    name: &str,
) -> Result<InterfaceState, StepError> {
    if name.trim().is_empty() {
        return Err(StepError::Check("No target interface specified".to_string()));
    }
    let interfaces = device.list_interfaces().await?;
    interfaces
        .into_iter()
        .find(|i| i.name == name)
        .ok_or_else(|| StepError::Check(format!("Interface '{name}' not found")))
}

/// Poll until every change in the batch is observable on the interface.
async fn confirm_applied(
    device: &dyn DeviceController,
    ctx: &ScenarioContext,
    key: &str,
    changes: &[InterfaceChange],
    action: String,
) -> Result<(), StepError> {
    ctx.confirm(action, || {
        let key = key.to_string();
        let changes = changes.to_vec();
        async move {
            let state = device.read_interface(&key).await?;
            Ok(changes.iter().all(|c| c.is_satisfied_by(&state)))
        }
    })
    .await
}

/// Issue a batch of changes and wait for it to converge.
async fn push_and_confirm(
    device: &dyn DeviceController,
    ctx: &ScenarioContext,
    key: &str,
    changes: &[InterfaceChange],
    action: String,
) -> Result<(), StepError> {
    device.apply(key, changes).await?;
    confirm_applied(device, ctx, key, changes, action).await
}

async fn push_settings(
    device: &dyn DeviceController,
    ctx: &ScenarioContext,
    key: &str,
    settings: &InterfaceSettings,
) -> Result<(), StepError> {
    push_and_confirm(
        device,
        ctx,
        key,
        settings.changes(),
        format!("{}.Push()", settings.describe()),
    )
    .await
}

/// Checked VLAN cycle: remove, add, remove, each confirmed by a poll.
/// The leading remove runs unconditionally to start from a clean
/// interface.
pub async fn try_add_remove_vlan(
    device: &dyn DeviceController,
    ctx: ScenarioContext,
    name: &str,
    vlan: VlanId,
) -> Result<(), StepError> {
    let iface = target(device, name).await?;
    let key = iface.key;

    // Remove to ensure a clean interface
    push_and_confirm(
        device,
        &ctx,
        &key,
        &[InterfaceChange::RemoveVlan(vlan)],
        format!("TryRemoveVlan({vlan})"),
    )
    .await?;

    push_and_confirm(
        device,
        &ctx,
        &key,
        &[InterfaceChange::AddVlan(vlan)],
        format!("TryAddVlan({vlan})"),
    )
    .await?;

    push_and_confirm(
        device,
        &ctx,
        &key,
        &[InterfaceChange::RemoveVlan(vlan)],
        format!("TryRemoveVlan({vlan})"),
    )
    .await
}

/// Raw VLAN cycle: conditional cleanup remove, then add, then remove,
/// each confirmed by polling the interface's VLAN membership directly.
pub async fn add_remove_vlan(
    device: &dyn DeviceController,
    ctx: ScenarioContext,
    name: &str,
    vlan: VlanId,
) -> Result<(), StepError> {
    let iface = target(device, name).await?;
    let key = iface.key.clone();

    // Remove to ensure a clean interface
    if iface.has_vlan(vlan) {
        push_and_confirm(
            device,
            &ctx,
            &key,
            &[InterfaceChange::RemoveVlan(vlan)],
            format!("RemoveVlan({vlan})"),
        )
        .await?;
    }

    push_and_confirm(
        device,
        &ctx,
        &key,
        &[InterfaceChange::AddVlan(vlan)],
        format!("AddVlan({vlan})"),
    )
    .await?;

    push_and_confirm(
        device,
        &ctx,
        &key,
        &[InterfaceChange::RemoveVlan(vlan)],
        format!("RemoveVlan({vlan})"),
    )
    .await
}

/// Toggle admin state: force Down for a clean start, then Up, then Down.
pub async fn get_set_admin_states(
    device: &dyn DeviceController,
    ctx: ScenarioContext,
    name: &str,
) -> Result<(), StepError> {
    let iface = target(device, name).await?;
    let key = iface.key.clone();

    // Force Down to ensure a clean interface
    if iface.admin_state.is_up() {
        push_and_confirm(
            device,
            &ctx,
            &key,
            &[InterfaceChange::SetAdminState(AdminState::Down)],
            "SetAdminState(Down)".to_string(),
        )
        .await?;
    }

    push_and_confirm(
        device,
        &ctx,
        &key,
        &[InterfaceChange::SetAdminState(AdminState::Up)],
        "SetAdminState(Up)".to_string(),
    )
    .await?;

    push_and_confirm(
        device,
        &ctx,
        &key,
        &[InterfaceChange::SetAdminState(AdminState::Down)],
        "SetAdminState(Down)".to_string(),
    )
    .await
}

/// Checked batch push: clean (remove VLAN, admin Down), configure (add
/// VLAN, admin Up), then clean again.
pub async fn try_change_settings(
    device: &dyn DeviceController,
    ctx: ScenarioContext,
    name: &str,
    vlan: VlanId,
) -> Result<(), StepError> {
    let iface = target(device, name).await?;
    let key = iface.key;

    let clean = InterfaceSettings::new()
        .remove_vlan(vlan)
        .set_admin_state(AdminState::Down);
    let configure = InterfaceSettings::new()
        .add_vlan(vlan)
        .set_admin_state(AdminState::Up);

    // Remove to ensure a clean interface
    push_settings(device, &ctx, &key, &clean).await?;
    push_settings(device, &ctx, &key, &configure).await?;
    push_settings(device, &ctx, &key, &clean).await
}

/// Raw batch push with an explicit pre-check: the cleanup push only runs
/// when the interface actually carries the VLAN or is admin Up.
pub async fn change_settings(
    device: &dyn DeviceController,
    ctx: ScenarioContext,
    name: &str,
    vlan: VlanId,
) -> Result<(), StepError> {
    let iface = target(device, name).await?;
    let key = iface.key.clone();

    let clean = InterfaceSettings::new()
        .remove_vlan(vlan)
        .set_admin_state(AdminState::Down);
    let configure = InterfaceSettings::new()
        .add_vlan(vlan)
        .set_admin_state(AdminState::Up);

    // Remove to ensure a clean interface
    if iface.has_vlan(vlan) || iface.admin_state.is_up() {
        push_settings(device, &ctx, &key, &clean).await?;
    }

    push_settings(device, &ctx, &key, &configure).await?;
    push_settings(device, &ctx, &key, &clean).await
}
