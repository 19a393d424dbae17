use log::{debug, trace};
use serde::Deserialize;
use serde_json::Value;
use tokio::net::UdpSocket;

use crate::{DeviceState, Result};

pub const BPUP_PORT: u16 = 30007;

/// Push subscription client for the bridge's UDP protocol. The bridge
/// keeps the session alive for 60 seconds after our last datagram, so
/// callers resend [`BpupClient::keep_alive`] well within that window.
pub struct BpupClient {
    socket: UdpSocket,
}

impl BpupClient {
    pub async fn connect(host: &str) -> Result<BpupClient> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect((host, BPUP_PORT)).await?;

        let client = BpupClient { socket };
        client.keep_alive().await?;

        Ok(client)
    }

    pub async fn keep_alive(&self) -> Result<()> {
        self.socket.send(b"\n").await?;
        Ok(())
    }

    pub async fn read(&self) -> Result<BpupMessage> {
        let mut buffer = [0u8; 1024];

        loop {
            let size = self.socket.recv(&mut buffer).await?;

            match serde_json::from_slice::<BpupMessage>(&buffer[..size]) {
                Ok(message) => {
                    trace!("bpup message: {:?}", message);
                    return Ok(message);
                }
                Err(err) => debug!("ignoring malformed bpup datagram: {}", err),
            }
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BpupMessage {
    #[serde(rename = "B")]
    pub bond_id: String,
    #[serde(rename = "t", default)]
    pub topic: Option<String>,
    #[serde(rename = "b", default)]
    pub body: Option<Value>,
    #[serde(rename = "err_id", default)]
    pub err_id: Option<u16>,
    #[serde(rename = "err_msg", default)]
    pub err_msg: Option<String>,
}

impl BpupMessage {
    /// Extracts a device state update. Keep-alive acks, errors and
    /// updates for other resources yield `None`.
    pub fn device_state(&self) -> Option<(String, DeviceState)> {
        let topic = self.topic.as_deref()?;

        let device_id = topic
            .strip_prefix("devices/")?
            .strip_suffix("/state")?
            .to_string();

        let body = self.body.clone()?;

        match serde_json::from_value(body) {
            Ok(state) => Some((device_id, state)),
            Err(err) => {
                debug!("ignoring bad state payload for {}: {}", device_id, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_update() {
        let message: BpupMessage = serde_json::from_str(
            r#"{"B": "ZZBL12345", "t": "devices/6409d2a2/state", "b": {"power": 1, "speed": 2}}"#,
        )
        .unwrap();

        let (device_id, state) = message.device_state().unwrap();
        assert_eq!(device_id, "6409d2a2");
        assert_eq!(state.power, Some(true));
        assert_eq!(state.speed, Some(2));
    }

    #[test]
    fn test_keep_alive_ack() {
        let message: BpupMessage = serde_json::from_str(r#"{"B": "ZZBL12345"}"#).unwrap();
        assert!(message.device_state().is_none());
    }

    #[test]
    fn test_error_message() {
        let message: BpupMessage = serde_json::from_str(
            r#"{"B": "ZZBL12345", "err_id": 134, "err_msg": "jumbled message"}"#,
        )
        .unwrap();

        assert_eq!(message.err_id, Some(134));
        assert!(message.device_state().is_none());
    }

    #[test]
    fn test_other_resource_update() {
        let message: BpupMessage = serde_json::from_str(
            r#"{"B": "ZZBL12345", "t": "devices/6409d2a2/properties", "b": {"max_speed": 3}}"#,
        )
        .unwrap();

        assert!(message.device_state().is_none());
    }
}
