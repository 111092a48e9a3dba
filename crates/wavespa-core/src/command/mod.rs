// ── Control commands ──
//
// A command names the user's intent; the device family turns it into a
// plan (see `plan`) before anything touches the network.

mod plan;

use serde::Serialize;
use strum::AsRefStr;

use crate::model::BubblesLevel;

pub use plan::CommandPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SpaCommand {
    SetPower(bool),
    SetFilter(bool),
    SetHeater(bool),
    SetBubbles(BubblesLevel),
    SetLocked(bool),
    SetTargetTemperature(i64),
}
