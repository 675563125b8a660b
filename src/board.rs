//! Board geometry for the 米-pattern three-in-a-row game.
//!
//! Cells are addressed `0..9`, row-major over a 3×3 grid. Two fixed line sets
//! live over those cells: the move lines, along which a mark may slide one
//! step, and the win lines, the four strokes of 米 through the centre.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A straight triple of cell indices.
pub type Line = [usize; 3];

/// Win lines in their fixed enumeration order. When several complete at once
/// the earliest one is reported.
pub const WIN_LINES: [Line; 4] = [[3, 4, 5], [1, 4, 7], [0, 4, 8], [2, 4, 6]];

/// Rows, columns and diagonals used for one-step adjacency.
pub const MOVE_LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The two sides. `X` holds seat 0 and moves first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerMark {
    X,
    O,
}

impl PlayerMark {
    pub fn opponent(self) -> Self {
        match self {
            PlayerMark::X => PlayerMark::O,
            PlayerMark::O => PlayerMark::X,
        }
    }

    /// Room seat bound to this side.
    pub fn seat(self) -> usize {
        match self {
            PlayerMark::X => 0,
            PlayerMark::O => 1,
        }
    }

    pub fn from_seat(seat: usize) -> Option<Self> {
        match seat {
            0 => Some(PlayerMark::X),
            1 => Some(PlayerMark::O),
            _ => None,
        }
    }
}

/// Nine cells, each empty or holding one side's mark.
///
/// Serializes as a plain 9-element array of `null | "X" | "O"`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct Board([Option<PlayerMark>; CELL_COUNT]);

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Starting layout: `X` across the top row, `O` across the bottom row.
    pub fn new() -> Self {
        use PlayerMark::{O, X};
        Self([
            Some(X),
            Some(X),
            Some(X),
            None,
            None,
            None,
            Some(O),
            Some(O),
            Some(O),
        ])
    }

    pub fn from_cells(cells: [Option<PlayerMark>; CELL_COUNT]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Option<PlayerMark>; CELL_COUNT] {
        &self.0
    }

    /// Mark at `cell`, or `None` when the cell is empty or off the board.
    pub fn get(&self, cell: usize) -> Option<PlayerMark> {
        self.0.get(cell).copied().flatten()
    }

    pub fn is_empty_cell(&self, cell: usize) -> bool {
        cell < CELL_COUNT && self.0[cell].is_none()
    }

    /// Slides the mark on `from` onto `to`. Callers validate first; this only
    /// relocates, it never creates or removes a mark.
    pub(crate) fn relocate(&mut self, from: usize, to: usize) {
        let mark = self.0[from].take();
        self.0[to] = mark;
    }

    pub fn count(&self, mark: PlayerMark) -> usize {
        self.0.iter().filter(|c| **c == Some(mark)).count()
    }
}

/// Empty cells one step away from `source` along any move line.
///
/// Returns an empty set when `source` is empty or not a board cell.
pub fn legal_targets(board: &Board, source: usize) -> BTreeSet<usize> {
    let mut targets = BTreeSet::new();
    if board.get(source).is_none() {
        return targets;
    }

    for line in MOVE_LINES.iter() {
        let Some(pos) = line.iter().position(|&c| c == source) else {
            continue;
        };
        let before = pos.checked_sub(1).map(|p| line[p]);
        let after = line.get(pos + 1).copied();
        for neighbour in before.into_iter().chain(after) {
            if board.is_empty_cell(neighbour) {
                targets.insert(neighbour);
            }
        }
    }

    targets
}

/// First win line held entirely by one mark, in [`WIN_LINES`] order.
pub fn winning_line(board: &Board) -> Option<Line> {
    WIN_LINES.iter().copied().find(|&[a, b, c]| {
        let mark = board.get(a);
        mark.is_some() && mark == board.get(b) && mark == board.get(c)
    })
}

#[cfg(test)]
mod tests {
    use super::PlayerMark::{O, X};
    use super::*;

    fn every_board() -> impl Iterator<Item = Board> {
        // 3^9 assignments of empty/X/O.
        (0..3usize.pow(9)).map(|mut n| {
            let mut cells = [None; CELL_COUNT];
            for cell in cells.iter_mut() {
                *cell = match n % 3 {
                    0 => None,
                    1 => Some(X),
                    _ => Some(O),
                };
                n /= 3;
            }
            Board::from_cells(cells)
        })
    }

    #[test]
    fn test_initial_board_layout() {
        let board = Board::new();
        assert_eq!(
            board.cells(),
            &[Some(X), Some(X), Some(X), None, None, None, Some(O), Some(O), Some(O)]
        );
        assert_eq!(board.count(X), 3);
        assert_eq!(board.count(O), 3);
    }

    #[test]
    fn test_initial_targets() {
        let board = Board::new();
        assert_eq!(legal_targets(&board, 0), BTreeSet::from([3, 4]));
        assert_eq!(legal_targets(&board, 1), BTreeSet::from([4]));
        assert_eq!(legal_targets(&board, 2), BTreeSet::from([4, 5]));
        assert_eq!(legal_targets(&board, 7), BTreeSet::from([4]));
    }

    #[test]
    fn test_targets_do_not_wrap_line_ends() {
        // 0 and 2 share a row but are not adjacent.
        let board = Board::from_cells([Some(X), None, None, None, None, None, None, None, None]);
        assert_eq!(legal_targets(&board, 0), BTreeSet::from([1, 3, 4]));
    }

    #[test]
    fn test_centre_reaches_all_neighbours() {
        let board = Board::from_cells([None, None, None, None, Some(O), None, None, None, None]);
        assert_eq!(
            legal_targets(&board, 4),
            BTreeSet::from([0, 1, 2, 3, 5, 6, 7, 8])
        );
    }

    #[test]
    fn test_targets_from_empty_or_missing_source() {
        let board = Board::new();
        assert!(legal_targets(&board, 4).is_empty());
        assert!(legal_targets(&board, 9).is_empty());
        assert!(legal_targets(&board, usize::MAX).is_empty());
    }

    #[test]
    fn test_targets_never_occupied_nor_source() {
        for board in every_board() {
            for source in 0..CELL_COUNT {
                for target in legal_targets(&board, source) {
                    assert_ne!(target, source);
                    assert!(board.is_empty_cell(target), "{board:?} {source}->{target}");
                }
            }
        }
    }

    #[test]
    fn test_no_winner_initially() {
        assert_eq!(winning_line(&Board::new()), None);
    }

    #[test]
    fn test_not_a_win_off_line() {
        let board = Board::from_cells([
            None,
            None,
            Some(X),
            Some(X),
            Some(X),
            None,
            Some(O),
            Some(O),
            Some(O),
        ]);
        assert_eq!(winning_line(&board), None);
    }

    #[test]
    fn test_diagonal_win() {
        let board = Board::from_cells([
            Some(X),
            None,
            None,
            None,
            Some(X),
            None,
            None,
            None,
            Some(X),
        ]);
        assert_eq!(winning_line(&board), Some([0, 4, 8]));
    }

    #[test]
    fn test_outer_rows_never_win() {
        // Top and bottom rows are move lines only.
        let board = Board::from_cells([
            Some(O),
            Some(O),
            Some(O),
            None,
            None,
            None,
            Some(X),
            Some(X),
            Some(X),
        ]);
        assert_eq!(winning_line(&board), None);
    }

    #[test]
    fn test_double_win_reports_first_in_order() {
        // Both [3,4,5] and [1,4,7] complete; [3,4,5] comes first.
        let board = Board::from_cells([
            None,
            Some(O),
            None,
            Some(O),
            Some(O),
            Some(O),
            None,
            Some(O),
            None,
        ]);
        for _ in 0..10 {
            assert_eq!(winning_line(&board), Some([3, 4, 5]));
        }

        // [0,4,8] and [2,4,6] both complete; [0,4,8] comes first.
        let board = Board::from_cells([
            Some(X),
            None,
            Some(X),
            None,
            Some(X),
            None,
            Some(X),
            None,
            Some(X),
        ]);
        assert_eq!(winning_line(&board), Some([0, 4, 8]));
    }

    #[test]
    fn test_board_json_shape() {
        let json = serde_json::to_value(Board::new()).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["X", "X", "X", null, null, null, "O", "O", "O"])
        );
    }

    #[test]
    fn test_relocate_conserves_marks() {
        let mut board = Board::new();
        board.relocate(0, 3);
        assert_eq!(board.get(0), None);
        assert_eq!(board.get(3), Some(X));
        assert_eq!(board.count(X), 3);
        assert_eq!(board.count(O), 3);
    }
}
