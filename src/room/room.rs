use crate::board::{self, Board, Line, PlayerMark, CELL_COUNT};
use crate::error::MoveError;
use crate::server::ConnectionId;

/// Room identifiers go over the wire as decimal strings ("1", "2", ...).
pub type RoomId = String;

/// A move that passed validation and was written to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub side: PlayerMark,
    pub from: usize,
    pub to: usize,
    /// Set when this move completed a win line; the room is finished.
    pub winning_line: Option<Line>,
}

/// One two-player game: seat 0 plays `X`, seat 1 plays `O`.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    seats: [ConnectionId; 2],
    board: Board,
    turn: PlayerMark,
}

impl Room {
    pub fn new(id: RoomId, seat_x: ConnectionId, seat_o: ConnectionId) -> Self {
        Self {
            id,
            seats: [seat_x, seat_o],
            board: Board::new(),
            turn: PlayerMark::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> PlayerMark {
        self.turn
    }

    pub fn seats(&self) -> [ConnectionId; 2] {
        self.seats
    }

    pub fn connection_for(&self, side: PlayerMark) -> ConnectionId {
        self.seats[side.seat()]
    }

    pub fn side_of(&self, connection_id: ConnectionId) -> Option<PlayerMark> {
        self.seats
            .iter()
            .position(|&cid| cid == connection_id)
            .and_then(PlayerMark::from_seat)
    }

    /// The seat facing `connection_id`, if it is seated here.
    pub fn opponent_of(&self, connection_id: ConnectionId) -> Option<ConnectionId> {
        self.side_of(connection_id)
            .map(|side| self.connection_for(side.opponent()))
    }

    /// Validates and applies a move for `connection_id`.
    ///
    /// All checks run before the board is touched, so an `Err` leaves board
    /// and turn exactly as they were. On success the turn passes to the
    /// other side unless the move won.
    pub fn apply_move(
        &mut self,
        connection_id: ConnectionId,
        from: usize,
        to: usize,
    ) -> Result<AppliedMove, MoveError> {
        let side = self.side_of(connection_id).ok_or(MoveError::NotInRoom)?;
        if side != self.turn {
            return Err(MoveError::WrongTurn);
        }
        if from >= CELL_COUNT
            || self.board.get(from) != Some(side)
            || !self.board.is_empty_cell(to)
        {
            return Err(MoveError::InvalidMove);
        }
        if !board::legal_targets(&self.board, from).contains(&to) {
            return Err(MoveError::MoveNotAllowed);
        }

        self.board.relocate(from, to);

        let winning_line = board::winning_line(&self.board);
        if winning_line.is_none() {
            self.turn = side.opponent();
        }

        Ok(AppliedMove {
            side,
            from,
            to,
            winning_line,
        })
    }
}
