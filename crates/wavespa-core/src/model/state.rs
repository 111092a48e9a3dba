// ── Decoded spa state ──

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::BubblesLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TemperatureUnit {
    #[strum(serialize = "°C")]
    Celsius,
    #[strum(serialize = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Accepted target temperatures.
    pub fn limits(self) -> RangeInclusive<i64> {
        match self {
            Self::Celsius => 20..=40,
            Self::Fahrenheit => 68..=104,
        }
    }
}

/// Typed read of a device's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaState {
    pub power: bool,
    pub filter: bool,
    pub heater: bool,
    pub bubbles: BubblesLevel,
    /// `None` when the family has no panel lock.
    pub locked: Option<bool>,
    pub target_temperature: Option<i64>,
    pub current_temperature: Option<i64>,
    pub unit: TemperatureUnit,
    /// Heater on and target not yet reached.
    pub heating: bool,
}
