//! Scan lines: rows, columns, and the two diagonals.

use serde::{Deserialize, Serialize};

use super::grid::Coord;

/// One of the `2n + 2` scan lines of an `n` by `n` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Line {
    /// Horizontal line through row `y`.
    #[display("row {_0}")]
    Row(usize),
    /// Vertical line through column `x`.
    #[display("column {_0}")]
    Column(usize),
    /// Top-left to bottom-right.
    #[display("diagonal")]
    Diagonal,
    /// Bottom-left to top-right.
    #[display("anti-diagonal")]
    AntiDiagonal,
}

impl Line {
    /// All lines of an `n` by `n` field in scan priority: rows top to
    /// bottom, then columns left to right, then the diagonal, then the
    /// anti-diagonal. The evaluator and the opponent both resolve ties
    /// with this order.
    pub fn scan_order(size: usize) -> impl Iterator<Item = Line> {
        (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Coordinates of the line's cells, in line order. The anti-diagonal
    /// starts at the bottom-left corner.
    pub fn cells(self, size: usize) -> impl Iterator<Item = Coord> {
        (0..size).map(move |i| match self {
            Line::Row(y) => Coord::new(i, y),
            Line::Column(x) => Coord::new(x, i),
            Line::Diagonal => Coord::new(i, i),
            Line::AntiDiagonal => Coord::new(size - 1 - i, i),
        })
    }
}
