//! Welcome screen: the title card with Play and Exit.

use tracing::instrument;

use crate::scene::{Color, Node, NodeId, Point, Scene, TextStyle, Visual};

use super::elements::{Button, ButtonRow, FONT};
use super::{InputKey, Screen, ScreenTransition};

/// The title card. Left and Right move focus between Play and Exit,
/// Confirm activates the focused button.
#[derive(Debug)]
pub struct WelcomeScreen {
    root: NodeId,
    row: ButtonRow,
}

impl WelcomeScreen {
    /// Builds the screen's subtree under the scene root.
    #[instrument(skip(scene))]
    pub fn new(scene: &mut Scene) -> Self {
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
                content: "TIC-TAC-TOE".to_owned(),
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

impl Screen for WelcomeScreen {
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
