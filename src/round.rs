//! Round state machine: sides, turn order, reveal gating, and the
//! outcome.

use derive_getters::Getters;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::field::{evaluate, Coord, Grid, Mark, PlaceError, Verdict};

/// How a finished round ended, seen from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum RoundOutcome {
    /// The player completed a line.
    #[display("win")]
    Win,
    /// The opponent completed a line.
    #[display("loss")]
    Lose,
    /// The field filled up with no line.
    #[display("draw")]
    Draw,
}

impl RoundOutcome {
    /// Banner text for the outcome.
    pub fn label(self) -> &'static str {
        match self {
            RoundOutcome::Win => "YOU WIN!",
            RoundOutcome::Lose => "YOU LOSE!",
            RoundOutcome::Draw => "DRAW",
        }
    }
}

/// What the round is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Key input is open; the player is to move.
    AwaitingPlayer,
    /// The opponent should be asked for a move.
    AwaitingOpponent,
    /// A placed mark is still revealing; input stays shut until
    /// [`Round::reveal_complete`].
    ResolvingReveal,
    /// The round has ended.
    Over(RoundOutcome),
}

/// Why the round refused a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// A reveal is resolving or the round is over.
    #[display("placement while input is shut")]
    Locked,
    /// The grid refused the cell.
    #[display("{_0}")]
    Rejected(PlaceError),
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnError::Locked => None,
            TurnError::Rejected(err) => Some(err),
        }
    }
}

impl From<PlaceError> for TurnError {
    fn from(err: PlaceError) -> Self {
        TurnError::Rejected(err)
    }
}

/// One round of the game.
///
/// The player's sign is rolled at round start; X always moves first.
/// Placements go through [`Round::place`], which flips the side to move
/// and parks the round in [`Phase::ResolvingReveal`] until the caller
/// reports the reveal finished.
#[derive(Debug, Getters)]
pub struct Round {
    grid: Grid,
    player_mark: Mark,
    opponent_mark: Mark,
    to_move: Mark,
    phase: Phase,
}

impl Round {
    /// Starts a 3 by 3 round, rolling the player's sign with `rng`.
    #[instrument(skip(rng))]
    pub fn new(rng: &mut SmallRng) -> Self {
        let player_mark = if rng.gen_bool(0.5) { Mark::X } else { Mark::O };
        let round = Self::with_player_mark(player_mark);
        info!(player = %player_mark, "round started");
        round
    }

    /// Starts a 3 by 3 round with a fixed side assignment.
    pub fn with_player_mark(player_mark: Mark) -> Self {
        let phase = if player_mark == Mark::X {
            Phase::AwaitingPlayer
        } else {
            Phase::AwaitingOpponent
        };
        Self {
            grid: Grid::new(3),
            player_mark,
            opponent_mark: player_mark.opponent(),
            to_move: Mark::X,
            phase,
        }
    }

    /// Whether key input should currently be honored.
    pub fn input_open(&self) -> bool {
        matches!(self.phase, Phase::AwaitingPlayer)
    }

    /// The outcome, once the round is over.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            Phase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Places the side-to-move's mark at `coord` and returns it.
    ///
    /// On success the side to move flips and the phase parks in
    /// [`Phase::ResolvingReveal`].
    ///
    /// # Errors
    ///
    /// [`TurnError::Locked`] outside the two awaiting phases and
    /// [`TurnError::Rejected`] for a cell the grid refuses; the round is
    /// left untouched either way.
    #[instrument(skip(self))]
    pub fn place(&mut self, coord: Coord) -> Result<Mark, TurnError> {
        if !matches!(self.phase, Phase::AwaitingPlayer | Phase::AwaitingOpponent) {
            return Err(TurnError::Locked);
        }
        let mark = self.to_move;
        self.grid.place(coord, mark)?;
        self.to_move = mark.opponent();
        self.phase = Phase::ResolvingReveal;
        debug!(%mark, %coord, "mark placed, reveal pending");
        Ok(mark)
    }

    /// Runs the evaluator once the reveal animation has finished and
    /// advances the phase. Returns the verdict that drove the move.
    #[instrument(skip(self))]
    pub fn reveal_complete(&mut self) -> Verdict {
        let verdict = evaluate(&self.grid);
        self.phase = match verdict {
            Verdict::Won { mark, .. } => {
                let outcome = if mark == self.player_mark {
                    RoundOutcome::Win
                } else {
                    RoundOutcome::Lose
                };
                info!(winner = %mark, grid = %self.grid.display(), "round won");
                Phase::Over(outcome)
            }
            Verdict::Draw => {
                info!(grid = %self.grid.display(), "round drawn");
                Phase::Over(RoundOutcome::Draw)
            }
            Verdict::Ongoing => {
                if self.to_move == self.player_mark {
                    Phase::AwaitingPlayer
                } else {
                    Phase::AwaitingOpponent
                }
            }
        };
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_moves_first() {
        let round = Round::with_player_mark(Mark::X);
        assert_eq!(*round.to_move(), Mark::X);
        assert_eq!(*round.phase(), Phase::AwaitingPlayer);

        let round = Round::with_player_mark(Mark::O);
        assert_eq!(*round.to_move(), Mark::X);
        assert_eq!(*round.phase(), Phase::AwaitingOpponent);
    }

    #[test]
    fn test_place_flips_side_and_shuts_input() {
        let mut round = Round::with_player_mark(Mark::X);
        let mark = round.place(Coord::new(1, 1)).expect("open phase");
        assert_eq!(mark, Mark::X);
        assert_eq!(*round.to_move(), Mark::O);
        assert_eq!(*round.phase(), Phase::ResolvingReveal);
        assert!(!round.input_open());
    }

    #[test]
    fn test_place_refused_while_revealing() {
        let mut round = Round::with_player_mark(Mark::X);
        round.place(Coord::new(0, 0)).expect("open phase");
        assert_eq!(round.place(Coord::new(1, 1)), Err(TurnError::Locked));
    }

    #[test]
    fn test_taken_cell_leaves_round_untouched() {
        let mut round = Round::with_player_mark(Mark::X);
        round.place(Coord::new(0, 0)).expect("open phase");
        round.reveal_complete();
        round.place(Coord::new(1, 1)).expect("open phase");
        round.reveal_complete();

        let result = round.place(Coord::new(0, 0));
        assert!(matches!(result, Err(TurnError::Rejected(_))));
        assert_eq!(*round.to_move(), Mark::X);
        assert_eq!(*round.phase(), Phase::AwaitingPlayer);
    }

    #[test]
    fn test_sides_alternate_strictly() {
        let mut round = Round::with_player_mark(Mark::X);
        let coords = [
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(2, 0),
        ];
        let mut expected = Mark::X;
        for coord in coords {
            assert_eq!(round.place(coord).expect("open phase"), expected);
            round.reveal_complete();
            expected = expected.opponent();
        }
    }

    #[test]
    fn test_opponent_win_reads_as_loss() {
        let mut round = Round::with_player_mark(Mark::O);
        // X takes row 0 while O wanders.
        for coord in [
            Coord::new(0, 0),
            Coord::new(0, 2),
            Coord::new(1, 0),
            Coord::new(1, 2),
            Coord::new(2, 0),
        ] {
            round.place(coord).expect("open phase");
            round.reveal_complete();
        }
        assert_eq!(*round.phase(), Phase::Over(RoundOutcome::Lose));
        assert_eq!(round.outcome(), Some(RoundOutcome::Lose));
        assert_eq!(round.place(Coord::new(2, 2)), Err(TurnError::Locked));
    }

    #[test]
    fn test_full_field_without_line_is_a_draw() {
        let mut round = Round::with_player_mark(Mark::X);
        // X O X / X O O / O X X filled in alternating order.
        for coord in [
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(2, 0),
            Coord::new(1, 1),
            Coord::new(0, 1),
            Coord::new(2, 1),
            Coord::new(1, 2),
            Coord::new(0, 2),
            Coord::new(2, 2),
        ] {
            round.place(coord).expect("open phase");
            round.reveal_complete();
        }
        assert_eq!(round.outcome(), Some(RoundOutcome::Draw));
    }
}
