//! Gameplay screen: the board, the cursor, and the round machine.

use std::f32::consts::FRAC_PI_4;

use rand::rngs::SmallRng;
use rand::RngCore;
use tracing::{debug, instrument, warn};

use crate::ai::Opponent;
use crate::field::{Coord, Line, Verdict};
use crate::round::{Phase, Round, RoundOutcome};
use crate::scene::{Color, Node, NodeId, Point, Scene, Visual};

use super::elements::{mark_reveal, side_panel, REVEAL_TIME};
use super::{InputKey, Screen, ScreenTransition};

/// Side of one board cell in world units.
const CELL: f32 = 200.0;

/// Gray of the cursor frame.
const CURSOR_GRAY: Color = Color::rgb(0x66, 0x66, 0x66);

/// Green of the winning line.
const WIN_GREEN: Color = Color::rgb(0x00, 0x80, 0x00);

/// Center of the cell at `coord`, in board coordinates.
fn cell_center(coord: Coord) -> Point {
    Point::new(
        CELL * 0.5 + coord.x as f32 * CELL,
        CELL * 0.5 + coord.y as f32 * CELL,
    )
}

/// One round of play against the opponent.
///
/// Arrows move the cell cursor, Confirm places the player's mark.
/// Input shuts while a mark reveals; once the reveal lands the round
/// either continues (possibly with an opponent move), draws the winning
/// line, or reports the outcome.
#[derive(Debug)]
pub struct PlayingScreen {
    round: Round,
    opponent: Opponent,
    cursor: Coord,
    root: NodeId,
    board: NodeId,
    cursor_node: NodeId,
    revealing: Option<NodeId>,
    win_line: Option<NodeId>,
}

impl PlayingScreen {
    /// Builds the board, rolling sides and seeding the opponent from
    /// `rng`.
    #[instrument(skip(scene, rng))]
    pub fn new(scene: &mut Scene, rng: &mut SmallRng) -> Self {
        let round = Round::new(rng);
        let opponent = Opponent::with_seed(*round.opponent_mark(), rng.next_u64());
        let grid_side = round.grid().size() as u32;

        let parent = scene.root();
        let root = scene.insert(Node::group(), parent);
        let board = scene.insert(
            Node::with_visual(Visual::Lattice {
                cell: CELL,
                cols: grid_side,
                rows: grid_side,
                color: Color::BLACK,
                stroke: 3.0,
            })
            .at(340.0, 60.0),
            root,
        );
        let cursor = Coord::new(1, 1);
        let center = cell_center(cursor);
        let cursor_node = scene.insert(
            Node::with_visual(Visual::Rect {
                width: 190.0,
                height: 190.0,
                color: CURSOR_GRAY,
                stroke: 3.0,
            })
            .pivot(95.0, 95.0)
            .at(center.x, center.y),
            board,
        );
        side_panel(
            scene,
            root,
            "YOU",
            *round.player_mark(),
            Point::new(70.0, 230.0),
        );
        side_panel(
            scene,
            root,
            "AI",
            *round.opponent_mark(),
            Point::new(1010.0, 230.0),
        );

        Self {
            round,
            opponent,
            cursor,
            root,
            board,
            cursor_node,
            revealing: None,
            win_line: None,
        }
    }

    /// The round this screen is playing.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Current cursor cell.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Moves the cursor by one cell, clamped to the board.
    fn move_cursor(&mut self, scene: &mut Scene, dx: isize, dy: isize) {
        let last = self.round.grid().size().saturating_sub(1) as isize;
        let x = (self.cursor.x as isize + dx).clamp(0, last);
        let y = (self.cursor.y as isize + dy).clamp(0, last);
        self.cursor = Coord::new(x as usize, y as usize);
        let center = cell_center(self.cursor);
        if let Some(node) = scene.get_mut(self.cursor_node) {
            node.position = center;
        }
    }

    /// Asks the round to place the side-to-move's mark at `coord` and
    /// spawns its reveal. A refused placement changes nothing.
    fn place(&mut self, scene: &mut Scene, coord: Coord) {
        match self.round.place(coord) {
            Ok(mark) => {
                let center = cell_center(coord);
                let node = scene.insert(
                    Node::with_visual(mark_reveal(mark, 180.0, 3.0))
                        .at(center.x, center.y)
                        .animated(REVEAL_TIME),
                    self.board,
                );
                self.revealing = Some(node);
                self.sync_cursor(scene);
            }
            Err(err) => debug!(%err, %coord, "placement refused"),
        }
    }

    /// Lets the opponent move, if it is its turn.
    fn opponent_move(&mut self, scene: &mut Scene) -> ScreenTransition {
        if *self.round.phase() != Phase::AwaitingOpponent {
            warn!("opponent asked to move out of turn");
            return ScreenTransition::Stay;
        }
        match self.opponent.choose(self.round.grid()) {
            Some(coord) => {
                self.place(scene, coord);
                ScreenTransition::Stay
            }
            None => {
                // A field with a free cell always has an open line, so
                // this only fires on an exhausted field.
                warn!("opponent found no open line, ending the round as a draw");
                ScreenTransition::Finished(RoundOutcome::Draw)
            }
        }
    }

    /// Runs the evaluator after a mark reveal and reacts to the
    /// verdict.
    fn resolve_reveal(&mut self, scene: &mut Scene) -> ScreenTransition {
        match self.round.reveal_complete() {
            Verdict::Won { line, .. } => {
                self.draw_win_line(scene, line);
                ScreenTransition::Stay
            }
            Verdict::Draw => ScreenTransition::Finished(RoundOutcome::Draw),
            Verdict::Ongoing => {
                if *self.round.phase() == Phase::AwaitingOpponent {
                    self.opponent_move(scene)
                } else {
                    self.sync_cursor(scene);
                    ScreenTransition::Stay
                }
            }
        }
    }

    /// Stretches a green cross over the completed line. Its reveal
    /// delays the outcome report until the line has fully drawn.
    fn draw_win_line(&mut self, scene: &mut Scene, line: Line) {
        let mid = self.round.grid().size() as f32 * 0.5 * CELL;
        let node = Node::with_visual(Visual::CrossReveal {
            side: 180.0,
            color: WIN_GREEN,
            stroke: 9.0,
        })
        .animated(REVEAL_TIME);
        let node = match line {
            Line::Row(y) => node
                .at(mid, cell_center(Coord::new(0, y)).y)
                .scaled(3.3, 0.5),
            Line::Column(x) => node
                .at(cell_center(Coord::new(x, 0)).x, mid)
                .scaled(0.5, 3.3),
            Line::Diagonal => node.at(mid, mid).scaled(4.0, 0.5).rotated(FRAC_PI_4),
            Line::AntiDiagonal => node.at(mid, mid).scaled(4.0, 0.5).rotated(-FRAC_PI_4),
        };
        self.win_line = Some(scene.insert(node, self.board));
    }

    /// Shows the cursor exactly while input is open.
    fn sync_cursor(&mut self, scene: &mut Scene) {
        let open = self.round.input_open();
        if let Some(node) = scene.get_mut(self.cursor_node) {
            node.visible = open;
        }
    }
}

impl Screen for PlayingScreen {
    fn start(&mut self, scene: &mut Scene) {
        self.sync_cursor(scene);
        if *self.round.phase() == Phase::AwaitingOpponent {
            self.opponent_move(scene);
        }
    }

    fn handle_key(&mut self, key: InputKey, scene: &mut Scene) -> ScreenTransition {
        if !self.round.input_open() {
            return ScreenTransition::Stay;
        }
        match key {
            InputKey::Up => self.move_cursor(scene, 0, -1),
            InputKey::Down => self.move_cursor(scene, 0, 1),
            InputKey::Left => self.move_cursor(scene, -1, 0),
            InputKey::Right => self.move_cursor(scene, 1, 0),
            InputKey::Confirm => self.place(scene, self.cursor),
        }
        ScreenTransition::Stay
    }

    fn animations_completed(
        &mut self,
        completed: &[NodeId],
        scene: &mut Scene,
    ) -> ScreenTransition {
        if let Some(node) = self.revealing
            && completed.contains(&node)
        {
            self.revealing = None;
            return self.resolve_reveal(scene);
        }
        if let Some(node) = self.win_line
            && completed.contains(&node)
        {
            self.win_line = None;
            if let Some(outcome) = self.round.outcome() {
                return ScreenTransition::Finished(outcome);
            }
        }
        ScreenTransition::Stay
    }

    fn destroy(&mut self, scene: &mut Scene) {
        scene.remove(self.root);
    }
}
