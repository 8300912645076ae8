//! Scene nodes: transform, visibility, and visual content.

use std::time::Duration;

use super::animation::{Animation, EasingFn};
use super::graph::NodeId;

/// A point or vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal component, growing rightwards.
    pub x: f32,
    /// Vertical component, growing downwards.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point::new(0.0, 0.0);

    /// Creates a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Pure white.
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Creates a color from channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Font parameters for text visuals.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family name, as the surface understands it.
    pub family: &'static str,
    /// Font size in world units.
    pub size: f32,
    /// Fill color.
    pub color: Color,
}

/// What a node draws.
///
/// The reveal variants expose partial geometry below progress `1`:
/// the cross draws its first stroke over the first half of the reveal
/// and the second stroke over the rest, and the circle sweeps its arc
/// clockwise from the top.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Pure container, draws nothing itself.
    Group,
    /// Axis-aligned rectangle with its origin at the top-left corner.
    /// A `stroke` of zero fills instead of stroking.
    Rect {
        /// Width in world units.
        width: f32,
        /// Height in world units.
        height: f32,
        /// Stroke or fill color.
        color: Color,
        /// Stroke width; zero means fill.
        stroke: f32,
    },
    /// Board lattice of `cols` by `rows` square cells. Only the inner
    /// separators are drawn, not the outer border.
    Lattice {
        /// Cell side in world units.
        cell: f32,
        /// Number of columns.
        cols: u32,
        /// Number of rows.
        rows: u32,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        stroke: f32,
    },
    /// Two crossing strokes inside a `side` by `side` box centered on
    /// the origin.
    CrossReveal {
        /// Box side in world units.
        side: f32,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        stroke: f32,
    },
    /// Circle of `radius` centered on the origin.
    CircleReveal {
        /// Radius in world units.
        radius: f32,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        stroke: f32,
    },
    /// One line of text. The origin sits at the top-left of the line,
    /// with the baseline one font size below it.
    Text {
        /// The line to draw.
        content: String,
        /// Font parameters.
        style: TextStyle,
    },
}

/// A positioned, animatable element of the scene tree.
///
/// Transforms compose parent to child in a fixed order: translate to
/// `position`, rotate by `rotation`, scale by `scale`, then shift back
/// by `pivot`. Opacity multiplies down the tree, and an invisible node
/// hides its whole subtree.
#[derive(Debug)]
pub struct Node {
    /// Placement in the parent's coordinate space.
    pub position: Point,
    /// Local anchor subtracted after rotation and scale.
    pub pivot: Point,
    /// Per-axis scale factors.
    pub scale: Point,
    /// Rotation around the pivot, in radians, clockwise.
    pub rotation: f32,
    /// Local opacity in `0..=1`.
    pub alpha: f32,
    /// Whether the node and its subtree render at all.
    pub visible: bool,
    /// What the node draws.
    pub visual: Visual,
    /// Reveal clock, if the node animates.
    pub animation: Option<Animation>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    /// Creates a node drawing `visual` with an identity transform.
    pub fn with_visual(visual: Visual) -> Self {
        Self {
            position: Point::ZERO,
            pivot: Point::ZERO,
            scale: Point::new(1.0, 1.0),
            rotation: 0.0,
            alpha: 1.0,
            visible: true,
            visual,
            animation: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates an empty container node.
    pub fn group() -> Self {
        Self::with_visual(Visual::Group)
    }

    /// Moves the node to `(x, y)` in its parent's space.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Sets the local anchor.
    pub fn pivot(mut self, x: f32, y: f32) -> Self {
        self.pivot = Point::new(x, y);
        self
    }

    /// Sets per-axis scale factors.
    pub fn scaled(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Point::new(sx, sy);
        self
    }

    /// Sets the rotation in radians.
    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Starts the node hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Attaches a linear reveal clock over `duration`.
    pub fn animated(mut self, duration: Duration) -> Self {
        self.animation = Some(Animation::new(duration));
        self
    }

    /// Attaches a reveal clock with a custom easing curve.
    pub fn eased(mut self, duration: Duration, easing: EasingFn) -> Self {
        self.animation = Some(Animation::with_easing(duration, easing));
        self
    }

    /// The node's parent, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in insertion order, which is also draw order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Eased reveal progress in `0..=1`; `1` for nodes without a clock.
    pub fn progress(&self) -> f32 {
        self.animation.as_ref().map_or(1.0, Animation::progress)
    }
}
