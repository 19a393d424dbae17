use serde::{Deserialize, Serialize};

/// Device categories reported by the bridge as two-letter codes.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum DeviceType {
    #[serde(rename = "CF")]
    CeilingFan,
    #[serde(rename = "FP")]
    Fireplace,
    #[serde(rename = "MS")]
    MotorizedShades,
    #[serde(rename = "LT")]
    Light,
    #[serde(rename = "GX")]
    Generic,
    #[serde(other)]
    Unknown,
}

impl DeviceType {
    pub const fn is_fan(&self) -> bool {
        matches!(self, DeviceType::CeilingFan)
    }

    pub const fn is_fireplace(&self) -> bool {
        matches!(self, DeviceType::Fireplace)
    }
}
