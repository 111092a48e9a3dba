// ── Command planning ──
//
// Pure translation of a command into the single attribute sent to the
// device and the ordered writes applied to the cache once it is accepted.
// The extra writes mirror what the firmware does on its own (turning the
// pump off stops the heater, and so on).

use serde_json::Value;

use super::SpaCommand;
use crate::error::CoreError;
use crate::model::family::{airjet, hydrojet};
use crate::model::{Attributes, BubblesLevel, BubblesMapping, DeviceFamily};

#[derive(Debug, Clone, PartialEq)]
pub struct CommandPlan {
    /// Attribute sent in the control request.
    pub attribute: &'static str,
    pub value: Value,
    /// Primary write first, then cascades.
    pub writes: Vec<(&'static str, Value)>,
}

impl CommandPlan {
    fn new(attribute: &'static str, value: i64) -> Self {
        Self {
            attribute,
            value: Value::from(value),
            writes: vec![(attribute, Value::from(value))],
        }
    }

    fn cascade(mut self, attribute: &'static str, value: i64) -> Self {
        self.writes.push((attribute, Value::from(value)));
        self
    }

    fn cascade_if(self, condition: bool, cascades: &[(&'static str, i64)]) -> Self {
        if condition {
            cascades
                .iter()
                .copied()
                .fold(self, |plan, (attribute, value)| plan.cascade(attribute, value))
        } else {
            self
        }
    }

    /// Body of the control request.
    pub fn request_attrs(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert(self.attribute.to_owned(), self.value.clone());
        attrs
    }
}

impl DeviceFamily {
    /// Plan `command` against the device's current attributes.
    pub fn plan(self, command: &SpaCommand, attrs: &Attributes) -> Result<CommandPlan, CoreError> {
        if let SpaCommand::SetTargetTemperature(target) = *command {
            validate_target(self, attrs, target)?;
        }

        match self {
            Self::Airjet => Ok(plan_airjet(*command)),
            Self::Hydrojet { bubbles } => plan_hydrojet(bubbles, *command),
        }
    }
}

fn plan_airjet(command: SpaCommand) -> CommandPlan {
    match command {
        SpaCommand::SetPower(on) => CommandPlan::new(airjet::HEATER, i64::from(on))
            .cascade_if(!on, &[(airjet::FILTER, 0), (airjet::BUBBLE, 0)]),
        SpaCommand::SetFilter(on) => CommandPlan::new(airjet::FILTER, i64::from(on))
            .cascade_if(!on, &[(airjet::BUBBLE, 0), (airjet::HEATER, 0)]),
        SpaCommand::SetHeater(on) => CommandPlan::new(airjet::HEATER, i64::from(on))
            .cascade_if(on, &[(airjet::FILTER, 1)]),
        SpaCommand::SetBubbles(level) => {
            let on = level != BubblesLevel::Off;
            CommandPlan::new(airjet::BUBBLE, i64::from(on)).cascade_if(on, &[(airjet::FILTER, 1)])
        }
        SpaCommand::SetLocked(on) => CommandPlan::new(airjet::LOCKED, i64::from(on)),
        SpaCommand::SetTargetTemperature(target) => {
            CommandPlan::new(airjet::TARGET_TEMPERATURE, target)
        }
    }
}

fn plan_hydrojet(
    bubbles: &BubblesMapping,
    command: SpaCommand,
) -> Result<CommandPlan, CoreError> {
    Ok(match command {
        SpaCommand::SetPower(on) => CommandPlan::new(hydrojet::POWER, i64::from(on)).cascade_if(
            !on,
            &[(hydrojet::FILTER, 0), (hydrojet::HEAT, 0), (hydrojet::WAVE, 0)],
        ),
        SpaCommand::SetFilter(on) => {
            CommandPlan::new(hydrojet::FILTER, if on { hydrojet::FILTER_ON } else { 0 })
                .cascade_if(!on, &[(hydrojet::WAVE, 0), (hydrojet::HEAT, 0)])
        }
        SpaCommand::SetHeater(on) => {
            CommandPlan::new(hydrojet::HEAT, if on { hydrojet::HEAT_ON } else { 0 })
                .cascade_if(on, &[(hydrojet::FILTER, hydrojet::FILTER_ON)])
        }
        SpaCommand::SetBubbles(level) => {
            CommandPlan::new(hydrojet::WAVE, bubbles.to_api_value(level)).cascade_if(
                level != BubblesLevel::Off,
                &[(hydrojet::FILTER, hydrojet::FILTER_ON)],
            )
        }
        SpaCommand::SetLocked(_) => {
            return Err(CoreError::Unsupported {
                operation: "panel lock".into(),
                family: "Hydrojet".into(),
            });
        }
        SpaCommand::SetTargetTemperature(target) => {
            CommandPlan::new(hydrojet::TARGET_TEMPERATURE, target)
        }
    })
}

fn validate_target(family: DeviceFamily, attrs: &Attributes, target: i64) -> Result<(), CoreError> {
    let unit = family.unit(attrs);
    let limits = unit.limits();
    if limits.contains(&target) {
        Ok(())
    } else {
        Err(CoreError::validation(format!(
            "target temperature {target}{unit} is outside {}..={}{unit}",
            limits.start(),
            limits.end()
        )))
    }
}
