//! Composite node builders shared by the screens: focusable buttons,
//! side panels, and the mark reveals.

use std::time::Duration;

use crate::field::Mark;
use crate::scene::{Color, Node, NodeId, Point, Scene, TextStyle, Visual};

/// How long a mark takes to draw itself in.
pub(super) const REVEAL_TIME: Duration = Duration::from_millis(350);

/// Font family every screen draws text with.
pub(super) const FONT: &str = "arial";

/// Color of the X strokes.
pub(super) const CROSS_RED: Color = Color::rgb(0xff, 0x00, 0x00);

/// Color of the O ring and the button focus highlight.
pub(super) const RING_BLUE: Color = Color::rgb(0x00, 0x00, 0xff);

/// Reveal visual for `mark`: a cross in a `side` box or a ring of half
/// that diameter.
pub(super) fn mark_reveal(mark: Mark, side: f32, stroke: f32) -> Visual {
    match mark {
        Mark::X => Visual::CrossReveal {
            side,
            color: CROSS_RED,
            stroke,
        },
        Mark::O => Visual::CircleReveal {
            radius: side * 0.5,
            color: RING_BLUE,
            stroke,
        },
    }
}

/// Focusable caption button: an outlined box with a hidden highlight
/// bar that shows while the button is selected.
#[derive(Debug, Clone, Copy)]
pub(super) struct Button {
    highlight: NodeId,
}

impl Button {
    /// Builds the button subtree under `parent`, centered on
    /// `position`.
    pub(super) fn new(
        scene: &mut Scene,
        parent: NodeId,
        caption: &str,
        width: f32,
        position: Point,
    ) -> Self {
        let root = scene.insert(Node::group().at(position.x, position.y), parent);
        scene.insert(
            Node::with_visual(Visual::Rect {
                width,
                height: 50.0,
                color: Color::BLACK,
                stroke: 5.0,
            })
            .pivot(width * 0.5, 25.0),
            root,
        );
        let highlight = scene.insert(
            Node::with_visual(Visual::Rect {
                width: width - 20.0,
                height: 40.0,
                color: RING_BLUE,
                stroke: 0.0,
            })
            .pivot(width * 0.5 - 10.0, 20.0)
            .hidden(),
            root,
        );
        scene.insert(
            Node::with_visual(Visual::Text {
                content: caption.to_owned(),
                style: TextStyle {
                    family: FONT,
                    size: 30.0,
                    color: Color::BLACK,
                },
            })
            .pivot(width * 0.5 - 50.0, 20.0),
            root,
        );
        Self { highlight }
    }

    /// Shows or hides the focus highlight.
    pub(super) fn set_focused(&self, scene: &mut Scene, focused: bool) {
        if let Some(node) = scene.get_mut(self.highlight) {
            node.visible = focused;
        }
    }
}

/// Horizontal row of buttons with one focused at a time.
///
/// Focus moves saturate at the ends instead of wrapping.
#[derive(Debug)]
pub(super) struct ButtonRow {
    buttons: Vec<Button>,
    selected: usize,
}

impl ButtonRow {
    /// Wraps `buttons`, with the first one selected but not yet
    /// focused.
    pub(super) fn new(buttons: Vec<Button>) -> Self {
        Self {
            buttons,
            selected: 0,
        }
    }

    /// Focuses the first button.
    pub(super) fn focus_first(&mut self, scene: &mut Scene) {
        self.focus(scene, 0);
    }

    /// Moves focus one button to the left.
    pub(super) fn focus_left(&mut self, scene: &mut Scene) {
        self.focus(scene, self.selected.saturating_sub(1));
    }

    /// Moves focus one button to the right.
    pub(super) fn focus_right(&mut self, scene: &mut Scene) {
        let last = self.buttons.len().saturating_sub(1);
        self.focus(scene, (self.selected + 1).min(last));
    }

    /// Index of the selected button.
    pub(super) fn selected(&self) -> usize {
        self.selected
    }

    fn focus(&mut self, scene: &mut Scene, target: usize) {
        if let Some(button) = self.buttons.get(self.selected) {
            button.set_focused(scene, false);
        }
        self.selected = target;
        if let Some(button) = self.buttons.get(self.selected) {
            button.set_focused(scene, true);
        }
    }
}

/// Builds a side panel naming one seat at the table: a caption over an
/// animated rendition of the seat's mark.
pub(super) fn side_panel(
    scene: &mut Scene,
    parent: NodeId,
    caption: &str,
    mark: Mark,
    position: Point,
) -> NodeId {
    let root = scene.insert(Node::group().at(position.x, position.y), parent);
    scene.insert(
        Node::with_visual(Visual::Text {
            content: caption.to_owned(),
            style: TextStyle {
                family: FONT,
                size: 40.0,
                color: Color::BLACK,
            },
        })
        .at(70.0, 10.0),
        root,
    );
    scene.insert(
        Node::with_visual(mark_reveal(mark, 200.0, 4.0))
            .at(100.0, 160.0)
            .animated(REVEAL_TIME),
        root,
    );
    root
}
