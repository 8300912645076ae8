//! Core field types: marks, cells, coordinates, and the grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's sign on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The X sign (moves first).
    X,
    /// The O sign.
    O,
}

impl Mark {
    /// Returns the other sign.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// State of one field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Cell taken by a sign.
    Taken(Mark),
}

impl Cell {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Taken(mark) => Some(mark),
        }
    }

    /// Whether the cell is still free.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Field coordinates. `x` is the column, `y` the row, both zero-based
/// from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Coord {
    /// Creates a coordinate pair.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    /// The cell already holds a mark.
    #[display("cell {_0} is already taken")]
    Taken(Coord),
    /// The coordinate lies outside the field.
    #[display("coordinate {_0} is outside the field")]
    OutOfBounds(Coord),
}

impl std::error::Error for PlaceError {}

/// Square game field of a fixed side length.
///
/// Cells are stored row-major and change only through [`Grid::place`],
/// which refuses occupied cells, and [`Grid::reset`], which empties the
/// whole field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty field of `size` by `size` cells.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length of the field.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `coord`, or `None` outside the field.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Whether the cell at `coord` is inside the field and free.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Whether every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Puts `mark` into the empty cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Taken`] for an occupied cell and
    /// [`PlaceError::OutOfBounds`] for a coordinate off the field; the
    /// grid is left untouched either way.
    pub fn place(&mut self, coord: Coord, mark: Mark) -> Result<(), PlaceError> {
        let index = self.index(coord).ok_or(PlaceError::OutOfBounds(coord))?;
        if !self.cells[index].is_empty() {
            return Err(PlaceError::Taken(coord));
        }
        self.cells[index] = Cell::Taken(mark);
        Ok(())
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Formats the field as one `.`/`X`/`O` character per cell, rows
    /// separated by `|`. Handy in logs.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for y in 0..self.size {
            if y > 0 {
                out.push('|');
            }
            for x in 0..self.size {
                out.push(match self.cells[y * self.size + x] {
                    Cell::Empty => '.',
                    Cell::Taken(Mark::X) => 'X',
                    Cell::Taken(Mark::O) => 'O',
                });
            }
        }
        out
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.x < self.size && coord.y < self.size).then(|| coord.y * self.size + coord.x)
    }
}
