// ── Device families ──
//
// Models that share attribute names and encodings form a family. The
// family is resolved once per directory refresh and drives decoding,
// fault scanning and command planning.

use std::fmt;

use super::attributes::{flag, int};
use super::bubbles::{AIRJET_V01_BUBBLES, HYDROJET_BUBBLES};
use super::{Attributes, BubblesLevel, BubblesMapping, ErrorReport, FaultPattern, SpaState, TemperatureUnit};

/// Attribute names of the Wave spa family.
pub mod airjet {
    pub const HEATER: &str = "Heater";
    pub const FILTER: &str = "Filter";
    pub const BUBBLE: &str = "Bubble";
    pub const TARGET_TEMPERATURE: &str = "Temperature_setup";
    pub const CURRENT_TEMPERATURE: &str = "Current_temperature";
    pub const LOCKED: &str = "locked";
}

/// Attribute names and encodings of the Hydrojet family.
pub mod hydrojet {
    pub const POWER: &str = "power";
    pub const FILTER: &str = "filter";
    pub const HEAT: &str = "heat";
    pub const WAVE: &str = "wave";
    pub const TARGET_TEMPERATURE: &str = "Tset";
    pub const CURRENT_TEMPERATURE: &str = "Tnow";
    pub const UNIT: &str = "Tunit";
    pub const STATUS_WORD: &str = "word3";

    pub const FILTER_ON: i64 = 2;
    pub const HEAT_ON: i64 = 3;
    /// `word3` value once the target temperature is reached.
    pub const TARGET_REACHED: i64 = 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFamily {
    /// Wave_SPA_EU / Wave_SPA_US, and the fallback for unknown models.
    Airjet,
    /// Hydrojet, Hydrojet_Pro and Airjet_V01, which differ only in their
    /// bubbles encoding.
    Hydrojet { bubbles: &'static BubblesMapping },
}

impl DeviceFamily {
    pub const AIRJET_V01: Self = Self::Hydrojet {
        bubbles: &AIRJET_V01_BUBBLES,
    };
    pub const HYDROJET: Self = Self::Hydrojet {
        bubbles: &HYDROJET_BUBBLES,
    };

    pub fn name(self) -> &'static str {
        match self {
            Self::Airjet => "Airjet",
            Self::Hydrojet { .. } => "Hydrojet",
        }
    }

    pub fn supports_lock(self) -> bool {
        matches!(self, Self::Airjet)
    }

    pub fn error_patterns(self) -> &'static [FaultPattern] {
        match self {
            Self::Airjet => &FaultPattern::ALL,
            Self::Hydrojet { .. } => &[FaultPattern::FaultCode, FaultPattern::Generic],
        }
    }

    pub fn error_report(self, attrs: &Attributes) -> ErrorReport {
        ErrorReport::scan(attrs, self.error_patterns())
    }

    /// Unit the device currently reports its temperatures in.
    pub fn unit(self, attrs: &Attributes) -> TemperatureUnit {
        match self {
            Self::Airjet => TemperatureUnit::Celsius,
            Self::Hydrojet { .. } => {
                if attrs.contains_key(hydrojet::UNIT) && !flag(attrs, hydrojet::UNIT) {
                    TemperatureUnit::Fahrenheit
                } else {
                    TemperatureUnit::Celsius
                }
            }
        }
    }

    /// Raw bubbles value that the family's table does not recognise.
    pub fn unmapped_bubbles(self, attrs: &Attributes) -> Option<i64> {
        match self {
            Self::Airjet => None,
            Self::Hydrojet { bubbles } => {
                int(attrs, hydrojet::WAVE).filter(|raw| bubbles.lookup(*raw).is_none())
            }
        }
    }

    /// Decode attributes into a typed state. Missing attributes read as
    /// off or `None`.
    pub fn read(self, attrs: &Attributes) -> SpaState {
        match self {
            Self::Airjet => {
                let heater = flag(attrs, airjet::HEATER);
                let target = int(attrs, airjet::TARGET_TEMPERATURE);
                let current = int(attrs, airjet::CURRENT_TEMPERATURE);
                let below_target = matches!((current, target), (Some(c), Some(t)) if c < t);

                SpaState {
                    power: heater,
                    filter: flag(attrs, airjet::FILTER),
                    heater,
                    bubbles: if flag(attrs, airjet::BUBBLE) {
                        BubblesLevel::Max
                    } else {
                        BubblesLevel::Off
                    },
                    locked: Some(flag(attrs, airjet::LOCKED)),
                    target_temperature: target,
                    current_temperature: current,
                    unit: TemperatureUnit::Celsius,
                    heating: heater && below_target,
                }
            }
            Self::Hydrojet { bubbles } => {
                let heater = int(attrs, hydrojet::HEAT) == Some(hydrojet::HEAT_ON);
                let reached = int(attrs, hydrojet::STATUS_WORD) == Some(hydrojet::TARGET_REACHED);

                SpaState {
                    power: flag(attrs, hydrojet::POWER),
                    filter: int(attrs, hydrojet::FILTER) == Some(hydrojet::FILTER_ON),
                    heater,
                    bubbles: int(attrs, hydrojet::WAVE)
                        .map_or(BubblesLevel::Off, |raw| bubbles.from_api_value(raw)),
                    locked: None,
                    target_temperature: int(attrs, hydrojet::TARGET_TEMPERATURE),
                    current_temperature: int(attrs, hydrojet::CURRENT_TEMPERATURE),
                    unit: self.unit(attrs),
                    heating: heater && !reached,
                }
            }
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn attrs(value: serde_json::Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn airjet_read() {
        let state = DeviceFamily::Airjet.read(&attrs(json!({
            "Heater": 1, "Filter": 1, "Bubble": 0, "locked": 1,
            "Temperature_setup": 38, "Current_temperature": 30
        })));
        assert!(state.power);
        assert!(state.heater);
        assert!(state.filter);
        assert_eq!(state.bubbles, BubblesLevel::Off);
        assert_eq!(state.locked, Some(true));
        assert_eq!(state.target_temperature, Some(38));
        assert!(state.heating);
    }

    #[test]
    fn airjet_not_heating_at_target() {
        let state = DeviceFamily::Airjet.read(&attrs(json!({
            "Heater": 1, "Temperature_setup": 38, "Current_temperature": 38
        })));
        assert!(!state.heating);
    }

    #[test]
    fn hydrojet_read() {
        let state = DeviceFamily::AIRJET_V01.read(&attrs(json!({
            "power": 1, "filter": 2, "heat": 3, "wave": 51,
            "Tset": 100, "Tnow": 90, "Tunit": 0, "word3": 0
        })));
        assert!(state.power);
        assert!(state.filter);
        assert!(state.heater);
        assert_eq!(state.bubbles, BubblesLevel::Medium);
        assert_eq!(state.locked, None);
        assert_eq!(state.unit, TemperatureUnit::Fahrenheit);
        assert!(state.heating);
    }

    #[test]
    fn hydrojet_heat_reached() {
        let state = DeviceFamily::HYDROJET.read(&attrs(json!({"heat": 3, "word3": 1})));
        assert!(state.heater);
        assert!(!state.heating);
    }

    #[test]
    fn empty_attrs_read_as_off() {
        for family in [DeviceFamily::Airjet, DeviceFamily::HYDROJET] {
            let state = family.read(&Attributes::new());
            assert!(!state.power);
            assert!(!state.filter);
            assert_eq!(state.bubbles, BubblesLevel::Off);
            assert_eq!(state.target_temperature, None);
            assert_eq!(state.unit, TemperatureUnit::Celsius);
        }
    }

    #[test]
    fn unmapped_bubbles_detected() {
        assert_eq!(
            DeviceFamily::HYDROJET.unmapped_bubbles(&attrs(json!({"wave": 7}))),
            Some(7)
        );
        assert_eq!(
            DeviceFamily::HYDROJET.unmapped_bubbles(&attrs(json!({"wave": 40}))),
            None
        );
        assert_eq!(
            DeviceFamily::Airjet.unmapped_bubbles(&attrs(json!({"Bubble": 7}))),
            None
        );
    }

    #[test]
    fn hydrojet_ignores_airjet_only_faults() {
        let faults = attrs(json!({"earth": 1, "E05": 1}));
        let report = DeviceFamily::HYDROJET.error_report(&faults);
        assert_eq!(report.active_codes().collect::<Vec<_>>(), vec!["E05"]);
        assert_eq!(DeviceFamily::Airjet.error_report(&faults).active.len(), 2);
    }
}
