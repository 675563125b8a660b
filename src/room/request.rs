use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

use crate::room::RoomId;

/// Everything a client can ask for, tagged by `type`. Unknown fields are
/// ignored; anything that fails to parse is dropped by the gateway.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join,
    Leave,
    Move { room: RoomId, from: usize, to: usize },
}

impl ClientMessage {
    /// Parses one text frame. Only JSON objects are messages; a tagged enum
    /// would otherwise also accept the sequence form `["join"]`.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("message must be a JSON object"));
        }
        serde_json::from_value(value)
    }
}
