use std::collections::HashSet;

use serde::Deserialize;

use crate::{ActionKind, DeviceType};

/// Static capability descriptor for one device, assembled once from the
/// bridge and never refreshed afterwards.
#[derive(Clone, Debug)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub device_type: DeviceType,
    pub actions: HashSet<String>,
    pub max_speed: Option<u32>,
    pub commands: Vec<Command>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Command {
    pub name: String,
    pub action: String,
    #[serde(default)]
    pub argument: Option<u32>,
}

impl Device {
    pub fn has_action(&self, action: ActionKind) -> bool {
        self.actions.contains(action.as_str())
    }

    pub fn supports_speed(&self) -> bool {
        self.has_action(ActionKind::SetSpeed)
    }

    pub fn supports_direction(&self) -> bool {
        self.has_action(ActionKind::SetDirection)
    }

    pub fn supports_breeze(&self) -> bool {
        self.has_action(ActionKind::BreezeOn)
    }

    pub fn supports_fp_fan(&self) -> bool {
        self.has_action(ActionKind::SetFpFan)
    }

    /// Distinct speed values supported by the fireplace fan, ascending.
    pub fn fp_fan_speeds(&self) -> Vec<u32> {
        let mut speeds: Vec<u32> = self
            .commands
            .iter()
            .filter(|command| command.action == ActionKind::SetFpFan.as_str())
            .filter_map(|command| command.argument)
            .collect();

        speeds.sort_unstable();
        speeds.dedup();

        speeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(action: &str, argument: Option<u32>) -> Command {
        Command {
            name: action.to_string(),
            action: action.to_string(),
            argument,
        }
    }

    #[test]
    fn test_fp_fan_speeds_sorted_and_distinct() {
        let device = Device {
            id: "6409d2a2".to_string(),
            name: "Fireplace".to_string(),
            device_type: DeviceType::Fireplace,
            actions: HashSet::from(["SetFpFan".to_string()]),
            max_speed: None,
            commands: vec![
                command("SetFpFan", Some(100)),
                command("SetFpFan", Some(33)),
                command("TurnFpFanOff", None),
                command("SetFpFan", Some(66)),
                command("SetFpFan", Some(33)),
            ],
        };

        assert_eq!(device.fp_fan_speeds(), vec![33, 66, 100]);
        assert!(device.supports_fp_fan());
        assert!(!device.supports_speed());
    }
}
