use serde::de::Deserializer;
use serde::Deserialize;

use crate::Direction;

/// Latest state snapshot for one device, replaced wholesale on every
/// poll or push update. Fields the device does not report stay `None`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DeviceState {
    #[serde(default, deserialize_with = "flag")]
    pub power: Option<bool>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub breeze: Vec<u32>,
    #[serde(default, deserialize_with = "flag")]
    pub fpfan_power: Option<bool>,
    #[serde(default)]
    pub fpfan_speed: Option<u32>,
}

// power flags come over the wire as 0/1 integers
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<u8>::deserialize(deserializer)?;
    Ok(value.map(|value| value != 0))
}
