//! Ghost projection - where the active piece would come to rest

use crate::board::Board;
use crate::game_state::ActivePiece;

/// Lowest non-colliding position straight below `piece`.
///
/// Read-only; returns `(x, y)` with `x` unchanged.
pub fn project(board: &Board, piece: &ActivePiece) -> (i16, i16) {
    let mut y = piece.y;
    while !board.collides(&piece.shape, piece.x, y + 1) {
        y += 1;
    }
    (piece.x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::PieceKind;

    fn spawn(kind: PieceKind, x: i16) -> ActivePiece {
        ActivePiece {
            kind,
            shape: get_shape(kind),
            x,
            y: 0,
        }
    }

    #[test]
    fn test_ghost_on_empty_board_rests_on_floor() {
        let board = Board::new(12, 20);
        assert_eq!(project(&board, &spawn(PieceKind::O, 5)), (5, 18));
        // The I piece's occupied row is row 1 of its grid.
        assert_eq!(project(&board, &spawn(PieceKind::I, 4)), (4, 18));
    }

    #[test]
    fn test_ghost_rests_on_stack() {
        let mut board = Board::new(12, 20);
        board.set(5, 10, 3);
        assert_eq!(project(&board, &spawn(PieceKind::O, 5)), (5, 8));
        // Column 7 is clear, so a piece further right falls past the block.
        assert_eq!(project(&board, &spawn(PieceKind::O, 6)), (6, 18));
    }

    #[test]
    fn test_ghost_does_not_mutate() {
        let board = Board::new(12, 20);
        let piece = spawn(PieceKind::T, 4);
        let before = (board.clone(), piece);
        let _ = project(&board, &piece);
        assert_eq!((board, piece), before);
    }
}
