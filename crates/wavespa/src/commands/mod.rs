//! Command dispatch.

pub mod config_cmd;
mod devices;
mod login;
mod set;
mod status;
mod util;
mod watch;

use wavespa_core::{Controller, ControllerConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a network command to its handler.
pub async fn dispatch(
    cmd: Command,
    config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login => login::handle(&config, global).await,
        Command::Watch(args) => watch::handle(args, config, global).await,
        Command::Devices => {
            let controller = connect_once(config).await?;
            let result = devices::handle(&controller, global);
            controller.disconnect().await;
            result
        }
        Command::Status(args) => {
            let controller = connect_once(config).await?;
            let result = status::handle(&controller, args, global);
            controller.disconnect().await;
            result
        }
        Command::Set(args) => {
            let controller = connect_once(config).await?;
            let result = set::handle(&controller, args, global).await;
            controller.disconnect().await;
            result
        }
        // Handled before a controller config is resolved
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Log in and run one poll cycle, without a background driver.
async fn connect_once(mut config: ControllerConfig) -> Result<Controller, CliError> {
    config.poll_interval_secs = 0;
    let controller = Controller::new(config);
    controller.connect().await?;
    Ok(controller)
}
