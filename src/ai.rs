//! Heuristic opponent: complete a line, block a line, or play at random.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::field::{Cell, Coord, Grid, Line, Mark};

/// Every line that still has at least one free cell, in scan order.
pub fn open_lines(grid: &Grid) -> Vec<Line> {
    Line::scan_order(grid.size())
        .filter(|line| line.cells(grid.size()).any(|coord| grid.is_empty(coord)))
        .collect()
}

/// Move selector for one side of the field.
///
/// Selection runs three tiers in order, each scanning lines in
/// [`Line::scan_order`]:
///
/// 1. complete a line holding at least two own marks and a free cell;
/// 2. block such a line held by the other side;
/// 3. pick a uniformly random open line, then a uniformly random free
///    cell inside it.
///
/// The two-marks rule is exact one-move-to-win detection only on a
/// 3 by 3 field. On larger fields it over-triggers (two marks scattered
/// across a long line do not win in one move), and it stays that way:
/// the eagerness is part of the opponent's character.
#[derive(Debug)]
pub struct Opponent {
    mark: Mark,
    rng: SmallRng,
}

impl Opponent {
    /// Creates an opponent playing `mark`, seeded from the system.
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an opponent with a fixed seed, so runs can be replayed.
    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            mark,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The sign this opponent plays.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Picks the next cell to play, or `None` when no line has room
    /// left. An exhausted field is a caller-visible condition here, not
    /// an error.
    #[instrument(skip(self, grid), fields(mark = %self.mark))]
    pub fn choose(&mut self, grid: &Grid) -> Option<Coord> {
        if let Some(line) = self.winning_line(grid) {
            debug!(%line, "completing own line");
            return self.free_cell_in(grid, line);
        }
        if let Some(line) = self.blocking_line(grid) {
            debug!(%line, "blocking the other side");
            return self.free_cell_in(grid, line);
        }
        let open = open_lines(grid);
        let line = *open.choose(&mut self.rng)?;
        debug!(%line, "playing a random open line");
        self.free_cell_in(grid, line)
    }

    /// First line in scan order that the two-marks rule scores as
    /// winnable for this side.
    pub fn winning_line(&self, grid: &Grid) -> Option<Line> {
        scored_line(grid, self.mark)
    }

    /// First line in scan order that the other side threatens by the
    /// same rule.
    pub fn blocking_line(&self, grid: &Grid) -> Option<Line> {
        scored_line(grid, self.mark.opponent())
    }

    /// Uniformly random free cell of `line`.
    fn free_cell_in(&mut self, grid: &Grid, line: Line) -> Option<Coord> {
        let free: Vec<Coord> = line
            .cells(grid.size())
            .filter(|coord| grid.is_empty(*coord))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

/// First line in scan order holding at least two `mark` cells and one
/// free cell.
fn scored_line(grid: &Grid, mark: Mark) -> Option<Line> {
    Line::scan_order(grid.size()).find(|line| {
        let mut owned = 0;
        let mut free = 0;
        for coord in line.cells(grid.size()) {
            match grid.get(coord).and_then(Cell::mark) {
                Some(m) if m == mark => owned += 1,
                Some(_) => {}
                None => free += 1,
            }
        }
        owned >= 2 && free >= 1
    })
}
