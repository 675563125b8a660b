//! Move rejection reasons.

use derive_more::{Display, Error};

/// Why a move was rejected. A rejected move never touches the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The move named a room that does not exist (or has already ended).
    #[display("unknown room")]
    UnknownRoom,
    /// The sender holds no seat in the named room.
    #[display("not in room")]
    NotInRoom,
    #[display("not your turn")]
    WrongTurn,
    /// `from` does not hold the mover's mark, or `to` is occupied or off the board.
    #[display("invalid move")]
    InvalidMove,
    /// `to` is not one step from `from` along any move line.
    #[display("move not allowed")]
    MoveNotAllowed,
}

impl MoveError {
    /// Reason sent back to the mover, if this rejection is reported at all.
    /// Stale or foreign room references are dropped without a reply.
    pub fn reply_reason(self) -> Option<&'static str> {
        match self {
            MoveError::UnknownRoom | MoveError::NotInRoom => None,
            MoveError::WrongTurn => Some("not your turn"),
            MoveError::InvalidMove => Some("invalid move"),
            MoveError::MoveNotAllowed => Some("move not allowed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_reasons_match_display() {
        for err in [
            MoveError::WrongTurn,
            MoveError::InvalidMove,
            MoveError::MoveNotAllowed,
        ] {
            assert_eq!(err.reply_reason(), Some(err.to_string()).as_deref());
        }
    }

    #[test]
    fn test_room_reference_errors_are_silent() {
        assert_eq!(MoveError::UnknownRoom.reply_reason(), None);
        assert_eq!(MoveError::NotInRoom.reply_reason(), None);
    }
}
