//! Rotation resolver - quarter turns with horizontal wall kicks
//!
//! A turn that collides in place is retried at horizontal offsets
//! +1, -1, +2, -2, … while the step leading past each offset stays within the
//! shape's width: `+m` is tried while `2m - 1 <= width`, `-m` while
//! `2m + 1 <= width`. A 2-wide shape gets {+1}; 3- and 4-wide shapes get
//! {+1, -1, +2}. The first free offset wins. When none is free the piece is
//! left exactly as it was.

use crate::board::Board;
use crate::game_state::ActivePiece;
use crate::pieces::rotate;
use crate::types::RotationDirection;

/// Horizontal offsets probed after a colliding turn, in probe order
pub fn kick_offsets(width: usize) -> impl Iterator<Item = i16> {
    let width = width as i16;
    (1..=width)
        .flat_map(|magnitude| [magnitude, -magnitude])
        .take_while(move |&dx| 2 * dx.abs() - dx.signum() <= width)
}

/// Try to rotate `piece` in place on `board`.
///
/// Returns `Some(dx)` with the horizontal offset that was applied (0 when the
/// turn fit without a kick), or `None` if the rotation was rejected.
pub fn resolve(board: &Board, piece: &mut ActivePiece, direction: RotationDirection) -> Option<i16> {
    let rotated = rotate(&piece.shape, direction);

    let dx = std::iter::once(0)
        .chain(kick_offsets(rotated.size()))
        .find(|&dx| !board.collides(&rotated, piece.x + dx, piece.y))?;

    piece.shape = rotated;
    piece.x += dx;
    Some(dx)
}
