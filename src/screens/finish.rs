//! Finish screen: the outcome banner with Play and Exit.

use tracing::instrument;

use crate::round::RoundOutcome;
use crate::scene::{Color, Node, NodeId, Point, Scene, TextStyle, Visual};

use super::elements::{Button, ButtonRow, FONT};
use super::{InputKey, Screen, ScreenTransition};

/// The end-of-round card. Play starts another round, Exit leaves the
/// game.
#[derive(Debug)]
pub struct FinishScreen {
    root: NodeId,
    row: ButtonRow,
}

impl FinishScreen {
    /// Builds the screen's subtree, with `outcome` on the banner.
    #[instrument(skip(scene))]
    pub fn new(scene: &mut Scene, outcome: RoundOutcome) -> Self {
        let parent = scene.root();
        let root = scene.insert(Node::group().at(640.0, 360.0), parent);
        scene.insert(
            Node::with_visual(Visual::Rect {
                width: 720.0,
                height: 360.0,
                color: Color::BLACK,
                stroke: 5.0,
            })
            .pivot(360.0, 180.0),
            root,
        );
        scene.insert(
            Node::with_visual(Visual::Text {
                content: outcome.label().to_owned(),
                style: TextStyle {
                    family: FONT,
                    size: 50.0,
                    color: Color::BLACK,
                },
            })
            .at(-150.0, -150.0),
            root,
        );
        let play = Button::new(scene, root, "Play", 170.0, Point::new(-120.0, 50.0));
        let exit = Button::new(scene, root, "Exit", 170.0, Point::new(120.0, 50.0));
        Self {
            root,
            row: ButtonRow::new(vec![play, exit]),
        }
    }
}

impl Screen for FinishScreen {
    fn start(&mut self, scene: &mut Scene) {
        self.row.focus_first(scene);
    }

    fn handle_key(&mut self, key: InputKey, scene: &mut Scene) -> ScreenTransition {
        match key {
            InputKey::Left => {
                self.row.focus_left(scene);
                ScreenTransition::Stay
            }
            InputKey::Right => {
                self.row.focus_right(scene);
                ScreenTransition::Stay
            }
            InputKey::Confirm => {
                if self.row.selected() == 0 {
                    ScreenTransition::Play
                } else {
                    ScreenTransition::Exit
                }
            }
            InputKey::Up | InputKey::Down => ScreenTransition::Stay,
        }
    }

    fn destroy(&mut self, scene: &mut Scene) {
        scene.remove(self.root);
    }
}
