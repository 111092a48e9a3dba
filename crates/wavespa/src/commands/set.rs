//! `wavespa set`: send one command and print the resulting state.

use tracing::info;
use wavespa_core::{BubblesLevel, Controller, SpaCommand};

use crate::cli::{Bubbles, GlobalOpts, SetArgs, Setting};
use crate::error::CliError;
use crate::output;

use super::{status, util};

pub async fn handle(controller: &Controller, args: SetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let device_id = util::resolve_device_id(controller, &args.device)?;
    let command = to_command(&args.setting);

    info!(device = %device_id, command = command.as_ref(), "sending command");
    controller.execute(device_id.as_str(), command).await?;

    let views = status::collect(controller, &controller.snapshot(), Some(&device_id));
    let out = status::render(&views, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn to_command(setting: &Setting) -> SpaCommand {
    match *setting {
        Setting::Power { state } => SpaCommand::SetPower(state.is_on()),
        Setting::Filter { state } => SpaCommand::SetFilter(state.is_on()),
        Setting::Heat { state } => SpaCommand::SetHeater(state.is_on()),
        Setting::Lock { state } => SpaCommand::SetLocked(state.is_on()),
        Setting::Bubbles { level } => SpaCommand::SetBubbles(match level {
            Bubbles::Off => BubblesLevel::Off,
            Bubbles::Medium => BubblesLevel::Medium,
            Bubbles::Max => BubblesLevel::Max,
        }),
        Setting::Temp { value } => SpaCommand::SetTargetTemperature(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Switch;

    #[test]
    fn settings_map_to_commands() {
        assert_eq!(
            to_command(&Setting::Heat { state: Switch::On }),
            SpaCommand::SetHeater(true)
        );
        assert_eq!(
            to_command(&Setting::Bubbles {
                level: Bubbles::Medium
            }),
            SpaCommand::SetBubbles(BubblesLevel::Medium)
        );
        assert_eq!(
            to_command(&Setting::Temp { value: 38 }),
            SpaCommand::SetTargetTemperature(38)
        );
    }
}
