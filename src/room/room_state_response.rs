use serde::Serialize;

use crate::board::{Board, PlayerMark};
use crate::room::RoomId;

/// Snapshot sent to each seat when its room opens.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RoomStateResponse {
    pub room: RoomId,
    /// The side the receiving seat plays.
    pub side: PlayerMark,
    pub board: Board,
    pub turn: PlayerMark,
}
