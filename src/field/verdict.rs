//! Field evaluation: win and draw detection.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::grid::{Grid, Mark};
use super::lines::Line;

/// Outcome of scanning a field.
///
/// A win and a draw exclude each other, and a winner exists only on a
/// win, so the three cases live in one enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// No completed line and at least one free cell.
    Ongoing,
    /// `mark` holds every cell of `line`. When several lines complete on
    /// the same placement, `line` is the first one in scan order.
    Won {
        /// The winning sign.
        mark: Mark,
        /// The completed line.
        line: Line,
    },
    /// Every cell is taken and no line is complete.
    Draw,
}

impl Verdict {
    /// Whether the round has ended.
    pub fn is_over(self) -> bool {
        !matches!(self, Verdict::Ongoing)
    }
}

/// Scans `grid` for a completed line or a draw.
///
/// Lines are checked in [`Line::scan_order`]; the first completed one
/// decides the verdict and ends the scan. Fullness is taken from the
/// whole grid, so a grid that fills up on a winning placement still
/// reports the win, and a draw is never reported while any cell is free.
#[instrument]
pub fn evaluate(grid: &Grid) -> Verdict {
    for line in Line::scan_order(grid.size()) {
        if let Some(mark) = line_owner(grid, line) {
            return Verdict::Won { mark, line };
        }
    }
    if grid.is_full() {
        Verdict::Draw
    } else {
        Verdict::Ongoing
    }
}

/// The mark holding every cell of `line`, if there is one.
fn line_owner(grid: &Grid, line: Line) -> Option<Mark> {
    let mut cells = line.cells(grid.size());
    let mark = grid.get(cells.next()?)?.mark()?;
    for coord in cells {
        if grid.get(coord)?.mark() != Some(mark) {
            return None;
        }
    }
    Some(mark)
}
