//! Shared helpers for command handlers.

use wavespa_core::{Controller, DeviceId};

use crate::error::CliError;

/// Resolve a device identifier (device id or alias) via the directory.
///
/// Aliases compare case-insensitively; an exact id always wins.
pub fn resolve_device_id(controller: &Controller, identifier: &str) -> Result<DeviceId, CliError> {
    let devices = controller.devices();

    if let Some(device) = devices.iter().find(|d| d.id.as_str() == identifier) {
        return Ok(device.id.clone());
    }

    let mut by_alias = devices
        .iter()
        .filter(|d| !d.alias.is_empty() && d.alias.eq_ignore_ascii_case(identifier));
    match (by_alias.next(), by_alias.next()) {
        (Some(device), None) => Ok(device.id.clone()),
        (Some(_), Some(_)) => Err(CliError::validation(
            "device",
            format!("alias '{identifier}' matches more than one spa; use the device id"),
        )),
        (None, _) => Err(CliError::NotFound {
            identifier: identifier.into(),
        }),
    }
}
