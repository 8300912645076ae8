//! The game field: cells, scan lines, and the verdict evaluator.

mod grid;
mod lines;
mod verdict;

pub use grid::{Cell, Coord, Grid, Mark, PlaceError};
pub use lines::Line;
pub use verdict::{evaluate, Verdict};
