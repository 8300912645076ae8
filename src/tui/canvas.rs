//! Surface implementation painting onto a ratatui canvas.
//!
//! The scene works in a fixed world of 1280 by 720 units with the y
//! axis growing downwards, the way the screens were laid out. The
//! canvas widget wants y growing upwards, so every point flips on its
//! way out. Curves and fills turn into short braille line runs, and
//! opacity blends stroke colors toward the backdrop, since a terminal
//! cell has no alpha channel.

use ratatui::style::{Color as TermColor, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Context, Line};
use std::f32::consts::TAU;

use noughts::{Color, Point, Surface, TextStyle};

/// Width of the scene's world in units.
pub const WORLD_WIDTH: f32 = 1280.0;

/// Height of the scene's world in units.
pub const WORLD_HEIGHT: f32 = 720.0;

/// World units between scanlines when filling a shape.
const FILL_STEP: f32 = 3.0;

/// Segments used for a full circle.
const ARC_SEGMENTS: f32 = 64.0;

/// Row-major 2D affine transform.
#[derive(Debug, Clone, Copy)]
struct Affine {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Affine {
    const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Affine {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    fn scaling(sx: f32, sy: f32) -> Self {
        Affine {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Composes `self` after `rhs`: the result applies `rhs` first.
    fn then(self, rhs: Affine) -> Self {
        Affine {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }

    fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Scope {
    affine: Affine,
    alpha: f32,
}

/// One frame's drawing target over a canvas paint context.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    background: Color,
    state: Scope,
    stack: Vec<Scope>,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    /// Wraps `ctx` with `background` as the opacity blend base.
    pub fn new(ctx: &'a mut Context<'b>, background: Color) -> Self {
        Self {
            ctx,
            background,
            state: Scope {
                affine: Affine::IDENTITY,
                alpha: 1.0,
            },
            stack: Vec::new(),
        }
    }

    /// Whether the scope is too transparent to leave a visible trace.
    fn invisible(&self) -> bool {
        self.state.alpha < 1.0 / 255.0
    }

    /// Stroke color at the scope's opacity, blended toward the
    /// backdrop.
    fn blend(&self, color: Color) -> TermColor {
        let alpha = self.state.alpha;
        let mix = |channel: u8, base: u8| -> u8 {
            let mixed = f32::from(base) + (f32::from(channel) - f32::from(base)) * alpha;
            mixed.round().clamp(0.0, 255.0) as u8
        };
        TermColor::Rgb(
            mix(color.r, self.background.r),
            mix(color.g, self.background.g),
            mix(color.b, self.background.b),
        )
    }

    /// Draws a canvas line between two world points, flipping y.
    fn line_between(&mut self, from: Point, to: Point, color: TermColor) {
        self.ctx.draw(&Line {
            x1: f64::from(from.x),
            y1: f64::from(WORLD_HEIGHT - from.y),
            x2: f64::from(to.x),
            y2: f64::from(WORLD_HEIGHT - to.y),
            color,
        });
    }

    /// Transformed corners of a rectangle, clockwise from the origin
    /// corner.
    fn corners(&self, origin: Point, width: f32, height: f32) -> [Point; 4] {
        [
            self.state.affine.apply(origin),
            self.state
                .affine
                .apply(Point::new(origin.x + width, origin.y)),
            self.state
                .affine
                .apply(Point::new(origin.x + width, origin.y + height)),
            self.state
                .affine
                .apply(Point::new(origin.x, origin.y + height)),
        ]
    }
}

fn lerp(from: Point, to: Point, t: f32) -> Point {
    Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
}

impl Surface for CanvasSurface<'_, '_> {
    /// The canvas widget paints the backdrop itself; here the color
    /// only becomes the blend base for translucent strokes.
    fn fill_background(&mut self, color: Color) {
        self.background = color;
    }

    fn push(&mut self) {
        self.stack.push(self.state);
    }

    fn pop(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.affine = self.state.affine.then(Affine::translation(dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.state.affine = self.state.affine.then(Affine::rotation(radians));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.affine = self.state.affine.then(Affine::scaling(sx, sy));
    }

    fn multiply_alpha(&mut self, alpha: f32) {
        self.state.alpha = (self.state.alpha * alpha).clamp(0.0, 1.0);
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)], _width: f32, color: Color) {
        if self.invisible() {
            return;
        }
        let color = self.blend(color);
        for (from, to) in segments {
            let from = self.state.affine.apply(*from);
            let to = self.state.affine.apply(*to);
            self.line_between(from, to, color);
        }
    }

    fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, _line: f32, color: Color) {
        if self.invisible() {
            return;
        }
        let color = self.blend(color);
        let [p0, p1, p2, p3] = self.corners(origin, width, height);
        self.line_between(p0, p1, color);
        self.line_between(p1, p2, color);
        self.line_between(p2, p3, color);
        self.line_between(p3, p0, color);
    }

    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Color) {
        if self.invisible() {
            return;
        }
        let color = self.blend(color);
        let [p0, p1, p2, p3] = self.corners(origin, width, height);
        let edge = (p3.x - p0.x).hypot(p3.y - p0.y);
        let steps = (edge / FILL_STEP).ceil().clamp(1.0, 128.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.line_between(lerp(p0, p3, t), lerp(p1, p2, t), color);
        }
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start: f32,
        sweep: f32,
        _width: f32,
        color: Color,
    ) {
        if self.invisible() || sweep.abs() < f32::EPSILON {
            return;
        }
        let color = self.blend(color);
        let steps = ((sweep.abs() / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
        let mut previous = None;
        for i in 0..=steps {
            let angle = start + sweep * (i as f32 / steps as f32);
            let local = Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
            let point = self.state.affine.apply(local);
            if let Some(previous) = previous {
                self.line_between(previous, point, color);
            }
            previous = Some(point);
        }
    }

    /// Terminal glyphs keep their cell size; the transform only places
    /// the line. The print anchor sits mid-height of the glyph box so
    /// coarse cells land close to where the world expects them.
    fn draw_text(&mut self, origin: Point, content: &str, style: &TextStyle) {
        if self.invisible() {
            return;
        }
        let anchor = self
            .state
            .affine
            .apply(Point::new(origin.x, origin.y + style.size * 0.5));
        let styled = TextLine::styled(
            content.to_owned(),
            Style::default().fg(self.blend(style.color)),
        );
        self.ctx.print(
            f64::from(anchor.x),
            f64::from(WORLD_HEIGHT - anchor.y),
            styled,
        );
    }
}
