use std::collections::HashMap;

use log::debug;

use crate::fan::Dispatch;
use crate::{Action, Error, FanKind, StatePayload};

pub async fn perform_action<D: Dispatch>(
    payload: &[u8],
    fans: &HashMap<String, FanKind<D>>,
) -> Result<(), Error> {
    let action: Action = serde_json::from_slice(payload)?;
    debug!("got action {:?}", action);

    let fan = fans
        .get(&action.device_id)
        .ok_or_else(|| Error::UnknownDevice(action.device_id.clone()))?;

    fan.handle(&action.action_type).await?;

    Ok(())
}

pub fn prepare_state<D: Dispatch>(fan: &FanKind<D>) -> StatePayload {
    fan.state_payload()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fan::tests::{fan_device, Recorder};
    use crate::Fan;

    fn fans() -> HashMap<String, FanKind<Recorder>> {
        let fan = Fan::new(fan_device(3, false), Recorder::new());
        HashMap::from([(fan.id().to_string(), FanKind::Ceiling(fan))])
    }

    #[tokio::test]
    async fn test_unknown_device() {
        let payload = br#"{"device_id": "missing", "action_type": "turn_off"}"#;

        let err = perform_action(payload, &fans()).await.unwrap_err();
        assert!(matches!(err, Error::UnknownDevice(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let err = perform_action(b"not json", &fans()).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_dispatches_to_fan() {
        let payload = br#"{
            "device_id": "79135791",
            "action_type": {"set_percentage": 50}
        }"#;

        perform_action(payload, &fans()).await.unwrap();
    }
}
