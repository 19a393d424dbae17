use serde::{Deserialize, Serialize};

use crate::Direction;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Action {
    pub device_id: String,
    pub action_type: ActionType,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TurnOn {
        percentage: Option<u8>,
        preset_mode: Option<String>,
    },
    TurnOff,
    SetPercentage(u8),
    SetDirection(Direction),
    SetPresetMode(String),
    SetSpeedBelief(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let action = Action {
            device_id: "6409d2a2".to_string(),
            action_type: ActionType::SetPercentage(50),
        };

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"device_id": "6409d2a2", "action_type": {"set_percentage": 50}})
        );

        let action = Action {
            device_id: "6409d2a2".to_string(),
            action_type: ActionType::TurnOff,
        };

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"device_id": "6409d2a2", "action_type": "turn_off"})
        );
    }

    #[test]
    fn test_turn_on_defaults() {
        let action: Action = serde_json::from_value(json!({
            "device_id": "6409d2a2",
            "action_type": {"turn_on": {}}
        }))
        .unwrap();

        assert_eq!(
            action.action_type,
            ActionType::TurnOn {
                percentage: None,
                preset_mode: None
            }
        );

        let action: Action = serde_json::from_value(json!({
            "device_id": "6409d2a2",
            "action_type": {"turn_on": {"percentage": 75}}
        }))
        .unwrap();

        assert_eq!(
            action.action_type,
            ActionType::TurnOn {
                percentage: Some(75),
                preset_mode: None
            }
        );
    }
}
