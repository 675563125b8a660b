use serde::Serialize;

use crate::board::{Line, PlayerMark};
use crate::room::RoomStateResponse;

/// Everything the server can send to a client, tagged by `type`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Queued,
    Start(RoomStateResponse),
    OpponentMove {
        from: usize,
        to: usize,
        side: PlayerMark,
    },
    Turn {
        turn: PlayerMark,
    },
    GameOver {
        winner: PlayerMark,
        line: Line,
    },
    OpponentLeft,
    Error {
        reason: &'static str,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
