//! Depth-first render pass over the scene tree.

use std::f32::consts::{FRAC_PI_2, TAU};

use super::graph::{NodeId, Scene};
use super::node::{Point, Visual};
use super::surface::Surface;

impl Scene {
    /// Renders the whole tree onto `surface`, children after parents in
    /// insertion order. An invisible node skips its entire subtree, so
    /// hiding the root blanks the scene.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.render_node(self.root(), surface);
    }

    fn render_node(&self, id: NodeId, surface: &mut dyn Surface) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        surface.push();
        surface.translate(node.position.x, node.position.y);
        surface.rotate(node.rotation);
        surface.scale(node.scale.x, node.scale.y);
        surface.translate(-node.pivot.x, -node.pivot.y);
        surface.multiply_alpha(node.alpha);
        draw_visual(&node.visual, node.progress(), surface);
        for &child in node.children() {
            self.render_node(child, surface);
        }
        surface.pop();
    }
}

/// Paints one visual at the given reveal progress, in local
/// coordinates.
fn draw_visual(visual: &Visual, progress: f32, surface: &mut dyn Surface) {
    match visual {
        Visual::Group => {}
        Visual::Rect {
            width,
            height,
            color,
            stroke,
        } => {
            if *stroke > 0.0 {
                surface.stroke_rect(Point::ZERO, *width, *height, *stroke, *color);
            } else {
                surface.fill_rect(Point::ZERO, *width, *height, *color);
            }
        }
        Visual::Lattice {
            cell,
            cols,
            rows,
            color,
            stroke,
        } => {
            let span_x = cell * *cols as f32;
            let span_y = cell * *rows as f32;
            let mut segments = Vec::with_capacity((cols + rows).saturating_sub(2) as usize);
            for i in 1..*cols {
                let x = cell * i as f32;
                segments.push((Point::new(x, 0.0), Point::new(x, span_y)));
            }
            for i in 1..*rows {
                let y = cell * i as f32;
                segments.push((Point::new(0.0, y), Point::new(span_x, y)));
            }
            surface.stroke_segments(&segments, *stroke, *color);
        }
        Visual::CrossReveal {
            side,
            color,
            stroke,
        } => {
            let half = side * 0.5;
            let mut segments: Vec<(Point, Point)> = Vec::with_capacity(2);
            if progress >= 1.0 {
                segments.push((Point::new(-half, -half), Point::new(half, half)));
                segments.push((Point::new(half, -half), Point::new(-half, half)));
            } else if progress <= 0.5 {
                // First stroke grows corner to corner over the first
                // half of the reveal.
                let t = 2.0 * progress - 0.5;
                segments.push((Point::new(-half, -half), Point::new(side * t, side * t)));
            } else {
                let t = 2.0 * progress - 1.5;
                segments.push((Point::new(-half, -half), Point::new(half, half)));
                segments.push((Point::new(half, -half), Point::new(-side * t, side * t)));
            }
            surface.stroke_segments(&segments, *stroke, *color);
        }
        Visual::CircleReveal {
            radius,
            color,
            stroke,
        } => {
            let sweep = if progress >= 1.0 { TAU } else { TAU * progress };
            surface.stroke_arc(Point::ZERO, *radius, -FRAC_PI_2, sweep, *stroke, *color);
        }
        Visual::Text { content, style } => {
            surface.draw_text(Point::ZERO, content, style);
        }
    }
}
