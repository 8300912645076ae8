//! Noughts library - tic-tac-toe on a retained 2D scene graph
//!
//! The game pits the player against a three-tier heuristic opponent and
//! presents itself through animated screens that a thin host renders
//! onto any [`Surface`].
//!
//! # Architecture
//!
//! - **Field**: the grid, its scan lines, and the win/draw evaluator
//! - **Opponent**: complete, block, or play a random open line
//! - **Round**: the turn machine gating input around mark reveals
//! - **Scene**: an id-addressed node arena with reveal clocks and a
//!   depth-first render pass
//! - **Flow**: welcome, playing, and finish screens plus ad breaks
//!
//! # Example
//!
//! ```
//! use noughts::{evaluate, Coord, Grid, Mark, Verdict};
//!
//! # fn main() -> Result<(), noughts::PlaceError> {
//! let mut grid = Grid::new(3);
//! grid.place(Coord::new(0, 0), Mark::X)?;
//! grid.place(Coord::new(1, 1), Mark::O)?;
//! assert_eq!(evaluate(&grid), Verdict::Ongoing);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod ai;
mod field;
mod flow;
mod round;
mod scene;
mod screens;

// Crate-level exports - Field types
pub use field::{evaluate, Cell, Coord, Grid, Line, Mark, PlaceError, Verdict};

// Crate-level exports - Opponent
pub use ai::{open_lines, Opponent};

// Crate-level exports - Round machine
pub use round::{Phase, Round, RoundOutcome, TurnError};

// Crate-level exports - Scene graph
pub use scene::{
    linear, Animation, Color, DrawOp, EasingFn, Node, NodeId, Point, RecordingSurface, Scene,
    Surface, TextStyle, Visual,
};

// Crate-level exports - Screens
pub use screens::{
    FinishScreen, InputKey, PlayingScreen, Screen, ScreenTransition, WelcomeScreen,
};

// Crate-level exports - Flow and ad breaks
pub use flow::{AdBreakStatus, AdGateway, Flow, NoAds, Stage, TimedIntermission, BACKDROP};
