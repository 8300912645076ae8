//! Render surface contract and a recording test double.

use super::node::{Color, Point, TextStyle};

/// Drawing target for one frame of the scene.
///
/// The contract mirrors an immediate-mode 2D canvas: a transform and
/// opacity scope that saves and restores as a stack, plus a handful of
/// stroke, fill, and text primitives in local coordinates. Opacity is
/// multiplicative: each scope draws with the product of every
/// [`Surface::multiply_alpha`] call on the stack.
pub trait Surface {
    /// Fills the whole target with `color` and resets the blend base.
    fn fill_background(&mut self, color: Color);

    /// Saves the current transform and opacity.
    fn push(&mut self);

    /// Restores the last saved transform and opacity.
    fn pop(&mut self);

    /// Translates the local space by `(dx, dy)`.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Rotates the local space clockwise by `radians`.
    fn rotate(&mut self, radians: f32);

    /// Scales the local space per axis.
    fn scale(&mut self, sx: f32, sy: f32);

    /// Multiplies the scope's opacity by `alpha`, clamped to `0..=1`.
    fn multiply_alpha(&mut self, alpha: f32);

    /// Strokes line segments given as `(from, to)` pairs.
    fn stroke_segments(&mut self, segments: &[(Point, Point)], width: f32, color: Color);

    /// Strokes a rectangle with its top-left corner at `origin`.
    fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, line: f32, color: Color);

    /// Fills a rectangle with its top-left corner at `origin`.
    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Color);

    /// Strokes a circular arc around `center`, starting at `start`
    /// radians and sweeping `sweep` radians clockwise.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start: f32,
        sweep: f32,
        width: f32,
        color: Color,
    );

    /// Draws one line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, content: &str, style: &TextStyle);
}

/// One call captured by a [`RecordingSurface`].
///
/// Visual operations carry the effective opacity they were drawn with,
/// so tests can check the compositing math without a real backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Background fill.
    FillBackground {
        /// Fill color.
        color: Color,
    },
    /// Scope save.
    Push,
    /// Scope restore.
    Pop,
    /// Local translation.
    Translate {
        /// Horizontal shift.
        dx: f32,
        /// Vertical shift.
        dy: f32,
    },
    /// Local rotation.
    Rotate {
        /// Clockwise angle in radians.
        radians: f32,
    },
    /// Local scale.
    Scale {
        /// Horizontal factor.
        sx: f32,
        /// Vertical factor.
        sy: f32,
    },
    /// Opacity multiplication.
    MultiplyAlpha {
        /// The factor applied.
        alpha: f32,
    },
    /// Stroked segments.
    StrokeSegments {
        /// The `(from, to)` pairs.
        segments: Vec<(Point, Point)>,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
        /// Effective opacity at draw time.
        alpha: f32,
    },
    /// Stroked rectangle.
    StrokeRect {
        /// Top-left corner.
        origin: Point,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Stroke width.
        line: f32,
        /// Stroke color.
        color: Color,
        /// Effective opacity at draw time.
        alpha: f32,
    },
    /// Filled rectangle.
    FillRect {
        /// Top-left corner.
        origin: Point,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        color: Color,
        /// Effective opacity at draw time.
        alpha: f32,
    },
    /// Stroked arc.
    StrokeArc {
        /// Arc center.
        center: Point,
        /// Radius.
        radius: f32,
        /// Start angle in radians.
        start: f32,
        /// Clockwise sweep in radians.
        sweep: f32,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
        /// Effective opacity at draw time.
        alpha: f32,
    },
    /// Text line.
    DrawText {
        /// Top-left corner.
        origin: Point,
        /// The text.
        content: String,
        /// Font size.
        size: f32,
        /// Fill color.
        color: Color,
        /// Effective opacity at draw time.
        alpha: f32,
    },
}

impl DrawOp {
    /// Whether the operation puts pixels on the target, as opposed to
    /// adjusting the scope.
    pub fn is_visual(&self) -> bool {
        matches!(
            self,
            DrawOp::StrokeSegments { .. }
                | DrawOp::StrokeRect { .. }
                | DrawOp::FillRect { .. }
                | DrawOp::StrokeArc { .. }
                | DrawOp::DrawText { .. }
        )
    }
}

/// Surface that records every call instead of drawing.
///
/// Used by tests to assert what a scene would paint: which primitives,
/// in what order, and at what effective opacity.
#[derive(Debug)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    alpha: f32,
    stack: Vec<f32>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Creates an empty recording at full opacity.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            alpha: 1.0,
            stack: Vec::new(),
        }
    }

    /// Every recorded call, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of recorded operations that put pixels on the target.
    pub fn visual_ops(&self) -> usize {
        self.ops.iter().filter(|op| op.is_visual()).count()
    }
}

impl Surface for RecordingSurface {
    fn fill_background(&mut self, color: Color) {
        self.ops.push(DrawOp::FillBackground { color });
    }

    fn push(&mut self) {
        self.stack.push(self.alpha);
        self.ops.push(DrawOp::Push);
    }

    fn pop(&mut self) {
        if let Some(alpha) = self.stack.pop() {
            self.alpha = alpha;
        }
        self.ops.push(DrawOp::Pop);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(DrawOp::Translate { dx, dy });
    }

    fn rotate(&mut self, radians: f32) {
        self.ops.push(DrawOp::Rotate { radians });
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.ops.push(DrawOp::Scale { sx, sy });
    }

    fn multiply_alpha(&mut self, alpha: f32) {
        self.alpha = (self.alpha * alpha).clamp(0.0, 1.0);
        self.ops.push(DrawOp::MultiplyAlpha { alpha });
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)], width: f32, color: Color) {
        self.ops.push(DrawOp::StrokeSegments {
            segments: segments.to_vec(),
            width,
            color,
            alpha: self.alpha,
        });
    }

    fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, line: f32, color: Color) {
        self.ops.push(DrawOp::StrokeRect {
            origin,
            width,
            height,
            line,
            color,
            alpha: self.alpha,
        });
    }

    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Color) {
        self.ops.push(DrawOp::FillRect {
            origin,
            width,
            height,
            color,
            alpha: self.alpha,
        });
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start: f32,
        sweep: f32,
        width: f32,
        color: Color,
    ) {
        self.ops.push(DrawOp::StrokeArc {
            center,
            radius,
            start,
            sweep,
            width,
            color,
            alpha: self.alpha,
        });
    }

    fn draw_text(&mut self, origin: Point, content: &str, style: &TextStyle) {
        self.ops.push(DrawOp::DrawText {
            origin,
            content: content.to_owned(),
            size: style.size,
            color: style.color,
            alpha: self.alpha,
        });
    }
}
