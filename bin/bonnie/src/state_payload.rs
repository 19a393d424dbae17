use serde::Serialize;

use crate::Direction;

/// Observable state published for one fan, recomputed from the latest
/// device snapshot only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatePayload {
    pub device_id: String,
    pub percentage: u8,
    pub speed_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_mode: Option<String>,
}
