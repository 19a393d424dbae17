use std::fmt;

use serde_json::Value;

use crate::Direction;

/// Action identifiers understood by the bridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    TurnOn,
    TurnOff,
    SetSpeed,
    SetDirection,
    BreezeOn,
    BreezeOff,
    TurnFpFanOn,
    TurnFpFanOff,
    SetFpFan,
    SetStateBelief,
}

impl ActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionKind::TurnOn => "TurnOn",
            ActionKind::TurnOff => "TurnOff",
            ActionKind::SetSpeed => "SetSpeed",
            ActionKind::SetDirection => "SetDirection",
            ActionKind::BreezeOn => "BreezeOn",
            ActionKind::BreezeOff => "BreezeOff",
            ActionKind::TurnFpFanOn => "TurnFpFanOn",
            ActionKind::TurnFpFanOff => "TurnFpFanOff",
            ActionKind::SetFpFan => "SetFpFan",
            ActionKind::SetStateBelief => "SetStateBelief",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named action plus its optional argument.
///
/// `SetStateBelief` is special: its argument is a `{field: value}` object
/// written to the device state resource, telling the bridge what to
/// believe the state is without actuating anything.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub argument: Option<Value>,
}

impl Action {
    pub const fn new(kind: ActionKind) -> Action {
        Action {
            kind,
            argument: None,
        }
    }

    pub fn turn_on() -> Action {
        Action::new(ActionKind::TurnOn)
    }

    pub fn turn_off() -> Action {
        Action::new(ActionKind::TurnOff)
    }

    pub fn set_speed(speed: u32) -> Action {
        Action {
            kind: ActionKind::SetSpeed,
            argument: Some(Value::from(speed)),
        }
    }

    pub fn set_direction(direction: Direction) -> Action {
        Action {
            kind: ActionKind::SetDirection,
            argument: serde_json::to_value(direction).ok(),
        }
    }

    pub fn breeze_on() -> Action {
        Action::new(ActionKind::BreezeOn)
    }

    pub fn breeze_off() -> Action {
        Action::new(ActionKind::BreezeOff)
    }

    pub fn turn_fp_fan_on() -> Action {
        Action::new(ActionKind::TurnFpFanOn)
    }

    pub fn turn_fp_fan_off() -> Action {
        Action::new(ActionKind::TurnFpFanOff)
    }

    pub fn set_fp_fan(speed: u32) -> Action {
        Action {
            kind: ActionKind::SetFpFan,
            argument: Some(Value::from(speed)),
        }
    }

    pub fn set_state_belief(field: &str, value: u32) -> Action {
        let mut argument = serde_json::Map::new();
        argument.insert(field.to_string(), Value::from(value));

        Action {
            kind: ActionKind::SetStateBelief,
            argument: Some(Value::Object(argument)),
        }
    }

    pub fn set_power_state_belief(power: bool) -> Action {
        Action::set_state_belief("power", power as u32)
    }

    pub fn set_speed_belief(speed: u32) -> Action {
        Action::set_state_belief("speed", speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arguments() {
        assert_eq!(Action::turn_on().argument, None);
        assert_eq!(Action::set_speed(2).argument, Some(json!(2)));
        assert_eq!(
            Action::set_direction(Direction::Reverse).argument,
            Some(json!(-1))
        );
        assert_eq!(Action::set_fp_fan(66).argument, Some(json!(66)));
    }

    #[test]
    fn test_belief_payload_shape() {
        let action = Action::set_power_state_belief(false);
        assert_eq!(action.kind, ActionKind::SetStateBelief);
        assert_eq!(action.argument, Some(json!({ "power": 0 })));

        let action = Action::set_speed_belief(3);
        assert_eq!(action.argument, Some(json!({ "speed": 3 })));

        let action = Action::set_state_belief("fpfan_speed", 66);
        assert_eq!(action.argument, Some(json!({ "fpfan_speed": 66 })));
    }
}
