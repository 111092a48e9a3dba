//! `wavespa status`: decoded state and active errors per spa.

use serde::Serialize;
use tabled::Tabled;

use wavespa_core::{Controller, DeviceId, Snapshot, SpaState};

use crate::cli::{GlobalOpts, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Device")]
    name: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Filter")]
    filter: String,
    #[tabled(rename = "Heater")]
    heater: String,
    #[tabled(rename = "Bubbles")]
    bubbles: String,
    #[tabled(rename = "Lock")]
    locked: String,
    #[tabled(rename = "Temp")]
    temperature: String,
    #[tabled(rename = "Filter life")]
    filter_life: String,
    #[tabled(rename = "Errors")]
    errors: String,
}

/// One spa's status as printed by `status`, `set` and `watch`.
#[derive(Debug, Serialize)]
pub struct StatusView {
    pub device_id: DeviceId,
    pub name: String,
    pub timestamp: i64,
    pub state: SpaState,
    pub filter_percent: Option<u8>,
    pub errors: Vec<String>,
}

pub fn handle(controller: &Controller, args: StatusArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let only = args
        .device
        .as_deref()
        .map(|ident| util::resolve_device_id(controller, ident))
        .transpose()?;

    let views = collect(controller, &controller.snapshot(), only.as_ref());
    if let (Some(id), true) = (&only, views.is_empty()) {
        return Err(CliError::Config {
            message: format!("no status has been reported for {id} yet"),
        });
    }

    let out = render(&views, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Join the snapshot with directory names, in directory order.
///
/// Devices the cloud has no data for yet are left out.
pub fn collect(
    controller: &Controller,
    snapshot: &Snapshot,
    only: Option<&DeviceId>,
) -> Vec<StatusView> {
    controller
        .devices()
        .iter()
        .filter(|d| only.is_none_or(|id| &d.id == id))
        .filter_map(|device| {
            let status = snapshot.get(device.id.as_str())?;
            Some(StatusView {
                device_id: device.id.clone(),
                name: device.display_name().to_owned(),
                timestamp: status.timestamp,
                state: status.state(),
                filter_percent: status.filter_percent(),
                errors: status.errors().active_codes().map(str::to_owned).collect(),
            })
        })
        .collect()
}

pub fn render(views: &[StatusView], global: &GlobalOpts) -> Result<String, CliError> {
    let color = output::should_color(&global.color);
    output::render_list(
        &global.output,
        views,
        |v| row(v, color),
        |v| format!("{}\t{}", v.device_id, if v.state.power { "on" } else { "off" }),
    )
}

fn row(view: &StatusView, color: bool) -> StatusRow {
    let state = &view.state;
    let temperature = match (state.current_temperature, state.target_temperature) {
        (Some(current), Some(target)) => {
            let arrow = if state.heating { " ↑" } else { "" };
            format!("{current}{unit} → {target}{unit}{arrow}", unit = state.unit)
        }
        (Some(current), None) => format!("{current}{}", state.unit),
        (None, Some(target)) => format!("→ {target}{}", state.unit),
        (None, None) => "-".into(),
    };

    StatusRow {
        name: view.name.clone(),
        power: output::on_off(state.power, color),
        filter: output::on_off(state.filter, color),
        heater: output::on_off(state.heater, color),
        bubbles: state.bubbles.to_string().to_lowercase(),
        locked: state
            .locked
            .map_or_else(|| "-".into(), |locked| output::on_off(locked, color)),
        temperature,
        filter_life: view
            .filter_percent
            .map_or_else(|| "-".into(), |p| format!("{p}%")),
        errors: if view.errors.is_empty() {
            "-".into()
        } else {
            output::alert(&view.errors.join(", "), color)
        },
    }
}
