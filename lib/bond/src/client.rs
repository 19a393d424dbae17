use std::collections::HashSet;
use std::sync::Arc;

use chipp_http::{HttpClient, HttpMethod, NoInterceptor};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{Action, ActionKind, Command, Device, DeviceState, DeviceType, Error, Result};

/// Client for the local HTTP API of a single bridge.
#[derive(Clone)]
pub struct Client {
    http: Arc<HttpClient<NoInterceptor>>,
}

impl Client {
    pub fn new(host: &str) -> Client {
        let http = HttpClient::new(&format!("http://{host}/v2")).unwrap();

        Client {
            http: Arc::new(http),
        }
    }

    /// Lists ids of all devices known to the bridge.
    pub async fn devices(&self) -> Result<Vec<String>> {
        let request = self.http.new_request(["devices"]);

        let body: Value = self
            .http
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        let devices = body
            .as_object()
            .ok_or(Error::UnexpectedPayload("devices"))?;

        Ok(devices
            .keys()
            .filter(|key| !key.starts_with('_'))
            .cloned()
            .collect())
    }

    /// Assembles the capability descriptor for one device. The command
    /// list is only fetched for fireplaces, where it carries the
    /// supported fan speed values.
    pub async fn device(&self, id: &str) -> Result<Device> {
        #[derive(Deserialize)]
        struct Info {
            name: String,
            #[serde(rename = "type")]
            device_type: DeviceType,
            #[serde(default)]
            actions: HashSet<String>,
        }

        let request = self.http.new_request(["devices", id]);
        let info: Info = self
            .http
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        let max_speed = self.max_speed(id).await?;

        let commands = if info.device_type.is_fireplace() {
            self.commands(id).await?
        } else {
            Vec::new()
        };

        Ok(Device {
            id: id.to_string(),
            name: info.name,
            device_type: info.device_type,
            actions: info.actions,
            max_speed,
            commands,
        })
    }

    pub async fn state(&self, id: &str) -> Result<DeviceState> {
        let request = self.http.new_request(["devices", id, "state"]);

        let state = self
            .http
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        Ok(state)
    }

    /// Executes an action against a device. `SetStateBelief` writes the
    /// believed state resource instead of the actions resource, so it
    /// never actuates hardware.
    pub async fn action(&self, device_id: &str, action: Action) -> Result<()> {
        debug!("dispatching {} for {}", action.kind, device_id);

        let mut request = if action.kind == ActionKind::SetStateBelief {
            self.http.new_request(["devices", device_id, "state"])
        } else {
            self.http
                .new_request(["devices", device_id, "actions", action.kind.as_str()])
        };

        request.set_method(HttpMethod::Put);

        match (action.kind, action.argument) {
            (ActionKind::SetStateBelief, Some(argument)) => request.set_json_body(&argument),
            (_, Some(argument)) => {
                request.set_json_body(&serde_json::json!({ "argument": argument }))
            }
            (_, None) => request.set_json_body(&serde_json::json!({})),
        }

        let (status, body) = self
            .http
            .perform_request(request, |_, response| {
                Ok((response.status_code, response.body.clone()))
            })
            .await?;

        if status >= 300 {
            return Err(Error::Api {
                code: status as u16,
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(())
    }

    async fn max_speed(&self, id: &str) -> Result<Option<u32>> {
        #[derive(Deserialize)]
        struct Properties {
            #[serde(default)]
            max_speed: Option<u32>,
        }

        let request = self.http.new_request(["devices", id, "properties"]);

        let properties: Properties = self
            .http
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        Ok(properties.max_speed)
    }

    async fn commands(&self, id: &str) -> Result<Vec<Command>> {
        let request = self.http.new_request(["devices", id, "commands"]);

        let body: Value = self
            .http
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        let list = body
            .as_object()
            .ok_or(Error::UnexpectedPayload("commands"))?;

        let mut commands = Vec::new();

        for command_id in list.keys().filter(|key| !key.starts_with('_')) {
            let request = self
                .http
                .new_request(["devices", id, "commands", command_id.as_str()]);

            let command: Command = self
                .http
                .perform_request(request, chipp_http::json::parse_json)
                .await?;

            commands.push(command);
        }

        Ok(commands)
    }
}
