//! `wavespa devices`: list the spas bound to the account.

use std::sync::Arc;

use tabled::Tabled;
use wavespa_core::{Controller, Device, FilterWear};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Online")]
    online: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "Filter")]
    filter: String,
}

#[derive(serde::Serialize)]
struct DeviceView {
    #[serde(flatten)]
    device: Arc<Device>,
    family: &'static str,
    filter_percent: Option<u8>,
}

pub fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let views: Vec<DeviceView> = controller
        .devices()
        .into_iter()
        .map(|device| DeviceView {
            filter_percent: controller
                .filter_wear(device.id.as_str())
                .map(FilterWear::percent_remaining),
            family: device.family.name(),
            device,
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &views,
        |v| DeviceRow {
            id: v.device.id.to_string(),
            name: v.device.display_name().to_owned(),
            product: v.device.product_name.clone(),
            dtype: v.device.device_type.to_string(),
            online: output::yes_no(v.device.is_online, color),
            firmware: format!(
                "mcu {} / wifi {}",
                v.device.mcu_soft_version, v.device.wifi_soft_version
            ),
            filter: v
                .filter_percent
                .map_or_else(|| "-".into(), |p| format!("{p}%")),
        },
        |v| v.device.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
